use std::time::Duration;

use relay_bot::actuators::sim::SimulatedActuator;
use relay_bot::actuators::{ActuatorExt, CommandActuator};
use relay_bot::display::sim::BufferedDisplay;
use relay_bot::ds::{CompetitionRuntime, CompetitionStatus, FixedStatus};
use relay_bot::input::gamepad::StandardGamepad;
use relay_bot::input::hid::sim::SimulatedHid;
use relay_bot::robot::{MotorOutputs, RelayBot};
use relay_bot::robot_main;
use relay_bot::start::{RobotResult, RobotState};
use relay_bot::Command;

/// Saturation applied at the hardware boundary.
const COMMAND_LIMIT: Command = 127;

fn motor_group(reversed: bool) -> Box<dyn CommandActuator + Send> {
  let motor = SimulatedActuator::new(0, Duration::ZERO).clamp(-COMMAND_LIMIT, COMMAND_LIMIT);
  if reversed {
    Box::new(motor.invert())
  } else {
    Box::new(motor)
  }
}

async fn relay_main(state: RobotState) -> RobotResult {
  // Competition wiring: the right drive and intake groups spin reversed.
  let outputs = MotorOutputs {
    drive_left: motor_group(false),
    drive_right: motor_group(true),
    intake: motor_group(true),
    outtake: motor_group(false),
  };

  let gamepad = StandardGamepad::new(SimulatedHid::new(4, 12));
  let display = BufferedDisplay::new();

  let robot = RelayBot::new(gamepad, display, outputs);

  // Nothing attached: goes straight to operator control, like a bench run.
  CompetitionRuntime::new(robot, FixedStatus(CompetitionStatus::empty()))
    .run(state)
    .await
}

robot_main!(async relay_main);
