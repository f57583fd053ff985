//! Cooperative delay boundary.

use std::thread;
use std::time::Duration;

/// Delay source used to pace the status cycle.
pub trait Clock {
    /// Sleeps (or yields) for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64);
}

/// [`Clock`] backed by the OS scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn delay_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
