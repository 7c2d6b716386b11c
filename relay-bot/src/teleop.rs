use crate::Command;

/// One cycle's worth of operator input, read fresh each control cycle and
/// discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSample {
  pub left_x: Command,
  pub left_y: Command,
  pub right_y: Command,
  pub up: bool,
  pub down: bool,
  pub left: bool,
}

/// Drive mixing schemes the mapper can apply. The relay robot's default
/// configuration leaves the drive unmapped in teleop; arcade mixing is
/// wired up but not enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveScheme {
  /// dir on left_y, turn on left_x: left = dir - turn, right = dir + turn.
  Arcade,
}

/// The motor demands computed from one input sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeleopDemand {
  pub drive: Option<(Command, Command)>,
  pub intake: Command,
  pub outtake: Command,
}

/// Maps an input sample to motor demands. Stateless: identical samples map
/// to identical demands. No clamping happens here; saturation is the
/// actuator's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeleopMapper {
  pub drive: Option<DriveScheme>,
}

impl TeleopMapper {
  pub fn new(drive: Option<DriveScheme>) -> Self {
    Self { drive }
  }

  pub fn map(&self, sample: &InputSample) -> TeleopDemand {
    let drive = self.drive.map(|scheme| match scheme {
      DriveScheme::Arcade => (sample.left_y - sample.left_x, sample.left_y + sample.left_x),
    });

    TeleopDemand {
      drive,
      intake: sample.right_y,
      outtake: sample.left_x,
    }
  }
}
