//! Clock abstraction for deterministic event timestamps.

use chrono::{DateTime, Utc};

/// Source of the current time, injected wherever a timestamp is recorded
/// so tests can pin it.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock delegating to the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
