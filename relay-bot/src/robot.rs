use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::info;

use crate::actuators::CommandActuator;
use crate::auton::{relay_sequence, Sequencer, StepCommands};
use crate::display::{Display, DisplayButtons, PressToggle};
use crate::ds::CompetitionRobot;
use crate::input::gamepad::Gamepad;
use crate::sensors::{AxisSensor, BinarySensor};
use crate::start::RobotResult;
use crate::teleop::{InputSample, TeleopDemand, TeleopMapper};
use crate::time::now;

/// How often the control loop runs.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(20);

/// The motor groups the program commands, boxed so the same program drives
/// real hardware or the simulated rig.
pub struct MotorOutputs {
  pub drive_left: Box<dyn CommandActuator + Send>,
  pub drive_right: Box<dyn CommandActuator + Send>,
  pub intake: Box<dyn CommandActuator + Send>,
  pub outtake: Box<dyn CommandActuator + Send>,
}

impl MotorOutputs {
  fn apply_step(&mut self, commands: &StepCommands, t: Duration) {
    if let Some(value) = commands.left {
      self.drive_left.set_command(value, t);
    }
    if let Some(value) = commands.right {
      self.drive_right.set_command(value, t);
    }
    if let Some(value) = commands.intake {
      self.intake.set_command(value, t);
    }
    if let Some(value) = commands.outtake {
      self.outtake.set_command(value, t);
    }
  }

  fn apply_teleop(&mut self, demand: &TeleopDemand, t: Duration) {
    if let Some((left, right)) = demand.drive {
      self.drive_left.set_command(left, t);
      self.drive_right.set_command(right, t);
    }
    self.intake.set_command(demand.intake, t);
    self.outtake.set_command(demand.outtake, t);
  }
}

struct CycleState {
  outputs: MotorOutputs,
  sequencer: Sequencer,
  toggle: PressToggle,
}

/// The relay robot program: flywheel teleop with a button-triggered,
/// timer-sequenced routine that takes over the rest of the match.
pub struct RelayBot<G, D> {
  gamepad: G,
  display: D,
  mapper: TeleopMapper,
  cycle: Mutex<CycleState>,
}

impl<G, D> RelayBot<G, D>
where
  G: Gamepad,
  D: Display,
{
  pub fn new(gamepad: G, display: D, outputs: MotorOutputs) -> Self {
    Self {
      gamepad,
      display,
      mapper: TeleopMapper::new(None),
      cycle: Mutex::new(CycleState {
        outputs,
        sequencer: Sequencer::new(relay_sequence()),
        toggle: PressToggle::new(2),
      }),
    }
  }

  pub fn with_mapper(mut self, mapper: TeleopMapper) -> Self {
    self.mapper = mapper;
    self
  }

  fn sample(&self) -> InputSample {
    InputSample {
      left_x: self.gamepad.left_x().get_position(),
      left_y: self.gamepad.left_y().get_position(),
      right_y: self.gamepad.right_y().get_position(),
      up: self.gamepad.up().get_state(),
      down: self.gamepad.down().get_state(),
      left: self.gamepad.left().get_state(),
    }
  }

  fn telemetry(&self, sample: &InputSample) {
    let buttons = self.display.buttons();
    self.display.set_text(
      0,
      &format!(
        "{} {} {}",
        buttons.contains(DisplayButtons::LEFT) as u8,
        buttons.contains(DisplayButtons::CENTER) as u8,
        buttons.contains(DisplayButtons::RIGHT) as u8
      ),
    );
    self.display.set_text(1, &format!("dir: {}", sample.left_y));
    self.display.set_text(2, &format!("turn: {}", sample.left_x));
    self.display.set_text(
      3,
      &format!("running either intake? : {}", (sample.down || sample.up) as u8),
    );
  }

  /// One control cycle: the whole externally visible behavior of the
  /// program while under operator control. While the sequencer is idle this
  /// is a flat read-map-write transform plus telemetry; once the trigger
  /// button starts the sequence, the cycle only ticks the sequencer and the
  /// sticks go dead for the rest of the run.
  pub fn opcontrol_cycle(&self, t: Duration) {
    let sample = self.sample();
    let mut cycle = self.cycle.lock().unwrap();
    let cycle = &mut *cycle;

    cycle.toggle.poll(&self.display);

    if cycle.sequencer.is_idle() {
      if sample.left {
        if let Some(commands) = cycle.sequencer.start(t) {
          cycle.outputs.apply_step(&commands, t);
        }
      } else {
        self.telemetry(&sample);
        let demand = self.mapper.map(&sample);
        cycle.outputs.apply_teleop(&demand, t);
      }
    } else if let Some(commands) = cycle.sequencer.tick(t) {
      cycle.outputs.apply_step(&commands, t);
    }
  }
}

#[async_trait]
impl<G, D> CompetitionRobot for RelayBot<G, D>
where
  G: Gamepad + Send + Sync,
  D: Display + Send + Sync,
{
  async fn init(&self) -> RobotResult {
    self.display.set_text(1, "relay bot ready");
    Ok(())
  }

  async fn disabled(&self) -> RobotResult {
    self.display.set_text(1, "inactive");
    Ok(())
  }

  async fn opcontrol(&self) -> RobotResult {
    info!("teleop started");
    self.display.set_text(4, "teleop started");

    loop {
      self.opcontrol_cycle(now());
      tokio::time::sleep(CYCLE_PERIOD).await;
    }
  }
}
