use crate::types::constants::{MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL};
use std::time::Duration;

/// Reconnect scheduling with a fixed delay and a bounded retry budget
#[derive(Debug, Clone)]
pub struct Timer {
    attempts: u32,
    interval: Duration,
    max_attempts: u32,
}

impl Timer {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            interval,
            max_attempts,
        }
    }

    /// Counts one more attempt and returns the delay before it, or `None`
    /// once the budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        self.attempts += 1;
        Some(self.interval)
    }

    /// Attempts scheduled since the last reset
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    /// Reset the timer
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(RECONNECT_INTERVAL),
            MAX_RECONNECT_ATTEMPTS,
        )
    }
}
