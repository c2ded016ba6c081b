use chrono::{Duration, Utc};
use hermes_core::Timestamp;
use hermes_ports::Clock;
use std::sync::Mutex;

/// Frozen clock for deterministic tests
///
/// Time only moves when a test says so, via [`set`](Self::set) or
/// [`advance`](Self::advance).
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Freeze at the current wall-clock instant
    pub fn from_system() -> Self {
        Self::new(Utc::now())
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
