use std::time::Duration;

use log::{info, warn};

use crate::Command;

/// The partial command set a sequence step writes when it begins. Unset
/// slots leave the previous motor command in place; the hardware layer holds
/// the last value written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepCommands {
  pub left: Option<Command>,
  pub right: Option<Command>,
  pub intake: Option<Command>,
  pub outtake: Option<Command>,
}

/// One timed step: the commands to write on entry and how long to hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStep {
  pub label: &'static str,
  pub commands: StepCommands,
  pub hold: Duration,
}

/// The built-in relay routine: charge the loading zone, spin up the intake,
/// back out with everything stopped, then dump through both flywheels.
/// Wraps around to the first step forever once started.
pub fn relay_sequence() -> Vec<SequenceStep> {
  vec![
    SequenceStep {
      label: "drive forward",
      commands: StepCommands { left: Some(80), right: Some(127), ..Default::default() },
      hold: Duration::from_millis(5000),
    },
    SequenceStep {
      label: "spin up intake",
      commands: StepCommands { intake: Some(127), ..Default::default() },
      hold: Duration::from_millis(5000),
    },
    SequenceStep {
      label: "reverse",
      commands: StepCommands {
        left: Some(-80),
        right: Some(-127),
        intake: Some(0),
        outtake: Some(0),
      },
      hold: Duration::from_millis(10000),
    },
    SequenceStep {
      label: "unload",
      commands: StepCommands {
        left: Some(0),
        right: Some(0),
        intake: Some(127),
        outtake: Some(127),
      },
      hold: Duration::from_millis(5000),
    },
  ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Idle,
  Running { step: usize, deadline: Duration },
}

/// Open-loop, timer-sequenced step machine. Driven by an explicit per-cycle
/// tick carrying the current time, so holds never block the control loop
/// and tests can walk the timeline without real delays. Once started it
/// cycles through the step list forever: there is no way back to idle and
/// no abort condition.
#[derive(Debug, Clone)]
pub struct Sequencer {
  steps: Vec<SequenceStep>,
  state: State,
}

impl Sequencer {
  pub fn new(steps: Vec<SequenceStep>) -> Self {
    Self { steps, state: State::Idle }
  }

  pub fn is_idle(&self) -> bool {
    matches!(self.state, State::Idle)
  }

  /// The label of the step currently holding, if any.
  pub fn current_step(&self) -> Option<&'static str> {
    match self.state {
      State::Idle => None,
      State::Running { step, .. } => Some(self.steps[step].label),
    }
  }

  /// Leaves idle and emits the first step's commands. Starting again while
  /// running is a no-op, as is starting an empty sequence.
  pub fn start(&mut self, now: Duration) -> Option<StepCommands> {
    if !self.is_idle() {
      return None;
    }
    let Some(first) = self.steps.first() else {
      warn!("sequence is empty, staying idle");
      return None;
    };
    info!("sequence started: {}", first.label);
    self.state = State::Running { step: 0, deadline: now + first.hold };
    Some(first.commands)
  }

  /// Runs once per control cycle. Emits the next step's commands exactly
  /// once when the current hold expires, and nothing otherwise.
  pub fn tick(&mut self, now: Duration) -> Option<StepCommands> {
    let State::Running { step, deadline } = self.state else {
      return None;
    };
    if now < deadline {
      return None;
    }

    let next = (step + 1) % self.steps.len();
    let entered = &self.steps[next];
    info!("sequence step: {}", entered.label);
    self.state = State::Running { step: next, deadline: now + entered.hold };
    Some(entered.commands)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{relay_sequence, SequenceStep, Sequencer, StepCommands};

  fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
  }

  #[test]
  fn stays_idle_until_started() {
    let mut seq = Sequencer::new(relay_sequence());

    assert!(seq.is_idle());
    assert_eq!(None, seq.tick(ms(0)));
    assert_eq!(None, seq.tick(ms(60_000)));
    assert!(seq.is_idle());
    assert_eq!(None, seq.current_step());
  }

  #[test]
  fn emits_the_relay_timeline_exactly() {
    let mut seq = Sequencer::new(relay_sequence());

    let first = seq.start(ms(0)).unwrap();
    assert_eq!(Some(80), first.left);
    assert_eq!(Some(127), first.right);
    assert_eq!(None, first.intake);
    assert_eq!(None, first.outtake);
    assert_eq!(Some("drive forward"), seq.current_step());

    // held for the full 5000ms
    assert_eq!(None, seq.tick(ms(20)));
    assert_eq!(None, seq.tick(ms(4_999)));

    let second = seq.tick(ms(5_000)).unwrap();
    assert_eq!(StepCommands { intake: Some(127), ..Default::default() }, second);
    assert_eq!(Some("spin up intake"), seq.current_step());

    assert_eq!(None, seq.tick(ms(9_999)));
    let third = seq.tick(ms(10_000)).unwrap();
    assert_eq!(Some(-80), third.left);
    assert_eq!(Some(-127), third.right);
    assert_eq!(Some(0), third.intake);
    assert_eq!(Some(0), third.outtake);

    // the reverse leg holds for 10000ms
    assert_eq!(None, seq.tick(ms(19_999)));
    let fourth = seq.tick(ms(20_000)).unwrap();
    assert_eq!(Some(0), fourth.left);
    assert_eq!(Some(0), fourth.right);
    assert_eq!(Some(127), fourth.intake);
    assert_eq!(Some(127), fourth.outtake);
  }

  #[test]
  fn wraps_back_to_the_first_step_forever() {
    let mut seq = Sequencer::new(relay_sequence());

    seq.start(ms(0)).unwrap();
    seq.tick(ms(5_000)).unwrap();
    seq.tick(ms(10_000)).unwrap();
    seq.tick(ms(20_000)).unwrap();

    let wrapped = seq.tick(ms(25_000)).unwrap();
    assert_eq!(Some(80), wrapped.left);
    assert_eq!(Some(127), wrapped.right);
    assert_eq!(Some("drive forward"), seq.current_step());

    // and around again
    assert_eq!(None, seq.tick(ms(29_999)));
    assert!(seq.tick(ms(30_000)).is_some());
    assert!(!seq.is_idle());
  }

  #[test]
  fn start_while_running_is_a_no_op() {
    let mut seq = Sequencer::new(relay_sequence());

    seq.start(ms(0)).unwrap();
    assert_eq!(None, seq.start(ms(100)));
    assert_eq!(Some("drive forward"), seq.current_step());

    // the original deadline is unchanged by the second start
    assert_eq!(None, seq.tick(ms(4_999)));
    assert!(seq.tick(ms(5_000)).is_some());
  }

  #[test]
  fn empty_sequence_never_leaves_idle() {
    let mut seq = Sequencer::new(Vec::new());

    assert_eq!(None, seq.start(ms(0)));
    assert!(seq.is_idle());
    assert_eq!(None, seq.tick(ms(1_000)));
  }

  #[test]
  fn late_ticks_still_advance() {
    let steps = vec![
      SequenceStep {
        label: "first",
        commands: StepCommands { left: Some(10), ..Default::default() },
        hold: Duration::from_millis(100),
      },
      SequenceStep {
        label: "second",
        commands: StepCommands { left: Some(20), ..Default::default() },
        hold: Duration::from_millis(100),
      },
    ];
    let mut seq = Sequencer::new(steps);

    seq.start(ms(0)).unwrap();
    // a tick far past the deadline advances one step, not several
    let next = seq.tick(ms(450)).unwrap();
    assert_eq!(Some(20), next.left);
    assert_eq!(Some("second"), seq.current_step());
    assert_eq!(None, seq.tick(ms(549)));
    assert!(seq.tick(ms(550)).is_some());
  }
}
