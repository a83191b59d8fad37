use std::time::Duration;

use chrono::{Local, Timelike, Utc};

/// Wall-clock access for the cycle runner.
pub trait Clock {
    /// Local hour of day, 0-23.
    fn hour(&self) -> u32;

    /// Seconds since the Unix epoch.
    fn unix_seconds(&self) -> i64;

    /// Block the calling thread for `interval`.
    fn sleep(&self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        Local::now().hour()
    }

    fn unix_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}
