use crate::domain::Clock;
use std::time::Duration;
use tokio::time::Instant;

/// Elapsed time since the clock was created.
///
/// Backed by tokio's clock so paused-time tests advance it together with the
/// tick interval.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
