use std::sync::OnceLock;
use std::time::{Duration, Instant};

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Monotonic time since the program first asked for it. Control code takes
/// time as a parameter rather than calling this directly, so tests can drive
/// it with synthetic timestamps.
pub fn now() -> Duration {
  EPOCH.get_or_init(Instant::now).elapsed()
}
