use std::error::Error;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};

use log::{error, info, warn};

pub type RobotResult = Result<(), Box<dyn Error + Send + Sync>>;

/// A shared flag tracking whether the program should keep running. Cleared
/// by `shutdown`, checked by the competition runtime's poll loop.
#[derive(Clone)]
pub struct RobotState {
  inner: Arc<AtomicBool>,
}

impl RobotState {
  pub fn new() -> Self {
    Self { inner: Arc::new(AtomicBool::new(true)) }
  }

  pub fn running(&self) -> bool {
    self.inner.load(Ordering::Relaxed)
  }

  pub fn shutdown(&self) {
    self.inner.store(false, Ordering::Relaxed)
  }
}

impl Default for RobotState {
  fn default() -> Self {
    Self::new()
  }
}

#[macro_export]
macro_rules! robot_main {
  ($func:ident) => {
    use relay_bot::start::init_all;

    pub fn main() {
      init_all($func);
    }
  };
  (async $func:ident) => {
    use relay_bot::start::init_all;

    pub fn main() {
      init_all(async_main);
    }

    #[tokio::main(flavor = "current_thread")]
    pub async fn async_main(running: RobotState) -> RobotResult {
      let fut = $func(running.clone());

      tokio::select! {
        result = fut => result,
        _ = async {
          loop {
            if !running.running() {
              return;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
          }
        } => Ok(())
      }
    }
  };
}

pub fn init_all<F: FnOnce(RobotState) -> RobotResult>(f: F) {
  log_init();

  info!("**** Running Robot ****");

  match f(RobotState::new()) {
    Ok(()) => warn!("Robot Exited Gracefully"),
    Err(e) => error!("Robot Error: {}", e),
  }
}

pub fn log_init() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .target(env_logger::Target::Stdout)
    .init();
}
