use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bitflags::bitflags;
use log::{error, info};
use tokio::task::JoinHandle;

use crate::start::{RobotResult, RobotState};

bitflags! {
  /// Raw competition status word, as reported by field control or a
  /// competition switch.
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub struct CompetitionStatus: u8 {
    /// Robot is disabled by field control.
    const DISABLED = 1 << 0;
    /// Robot is in the autonomous period.
    const AUTONOMOUS = 1 << 1;
    /// Robot is tethered to competition control.
    const CONNECTED = 1 << 2;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
  Disabled,
  Autonomous,
  Teleop,
}

impl CompetitionStatus {
  pub fn connected(&self) -> bool {
    self.contains(CompetitionStatus::CONNECTED)
  }

  /// Disabled wins over everything else; with no flags set (nothing
  /// attached) the robot goes straight to teleop.
  pub fn mode(&self) -> ControlMode {
    if self.contains(CompetitionStatus::DISABLED) {
      ControlMode::Disabled
    } else if self.contains(CompetitionStatus::AUTONOMOUS) {
      ControlMode::Autonomous
    } else {
      ControlMode::Teleop
    }
  }
}

/// Where the runtime reads competition state from.
pub trait StatusSource {
  fn status(&self) -> CompetitionStatus;
}

/// A status that never changes, for running outside competition control.
#[derive(Debug, Clone, Copy)]
pub struct FixedStatus(pub CompetitionStatus);

impl StatusSource for FixedStatus {
  fn status(&self) -> CompetitionStatus {
    self.0
  }
}

/// Competition lifecycle callbacks. Each mode callback runs as its own task
/// and is cancelled by the runtime when the mode changes, the same way the
/// hosting field control tears down a control task mid-flight. All
/// callbacks default to doing nothing.
#[async_trait]
pub trait CompetitionRobot: Send + Sync {
  async fn init(&self) -> RobotResult {
    Ok(())
  }

  async fn disabled(&self) -> RobotResult {
    Ok(())
  }

  async fn competition_init(&self) -> RobotResult {
    Ok(())
  }

  async fn autonomous(&self) -> RobotResult {
    Ok(())
  }

  async fn opcontrol(&self) -> RobotResult {
    Ok(())
  }
}

/// Polls the status source once per period and keeps exactly one mode task
/// alive, aborting the old task on a mode edge.
pub struct CompetitionRuntime<R, S> {
  robot: Arc<R>,
  source: S,
  period: Duration,
}

impl<R, S> CompetitionRuntime<R, S>
where
  R: CompetitionRobot + 'static,
  S: StatusSource,
{
  pub fn new(robot: R, source: S) -> Self {
    Self { robot: Arc::new(robot), source, period: Duration::from_millis(20) }
  }

  pub fn with_period(mut self, period: Duration) -> Self {
    self.period = period;
    self
  }

  /// Runs `init` (and `competition_init` when attached), then dispatches
  /// mode tasks until the program is shut down.
  pub async fn run(self, state: RobotState) -> RobotResult {
    self.robot.init().await?;

    if self.source.status().connected() {
      self.robot.competition_init().await?;
    }

    let mut active: Option<(ControlMode, JoinHandle<()>)> = None;

    while state.running() {
      let mode = self.source.status().mode();
      let changed = active.as_ref().map(|(m, _)| *m != mode).unwrap_or(true);

      if changed {
        if let Some((old, task)) = active.take() {
          info!("leaving {:?}", old);
          task.abort();
        }
        info!("entering {:?}", mode);

        let robot = self.robot.clone();
        let task = tokio::spawn(async move {
          let result = match mode {
            ControlMode::Disabled => robot.disabled().await,
            ControlMode::Autonomous => robot.autonomous().await,
            ControlMode::Teleop => robot.opcontrol().await,
          };
          if let Err(e) = result {
            error!("{:?} task failed: {}", mode, e);
          }
        });
        active = Some((mode, task));
      }

      tokio::time::sleep(self.period).await;
    }

    if let Some((_, task)) = active.take() {
      task.abort();
    }

    Ok(())
  }
}

#[cfg(feature = "simulation")]
pub mod sim {
  use std::sync::{Arc, RwLock};

  use super::{CompetitionStatus, StatusSource};

  /// A status source tests can flip at runtime.
  #[derive(Debug, Clone)]
  pub struct SimulatedStatusSource {
    status: Arc<RwLock<CompetitionStatus>>,
  }

  impl SimulatedStatusSource {
    pub fn new(initial: CompetitionStatus) -> Self {
      Self { status: Arc::new(RwLock::new(initial)) }
    }

    pub fn set_status(&self, status: CompetitionStatus) {
      *self.status.write().unwrap() = status;
    }
  }

  impl StatusSource for SimulatedStatusSource {
    fn status(&self) -> CompetitionStatus {
      *self.status.read().unwrap()
    }
  }
}
