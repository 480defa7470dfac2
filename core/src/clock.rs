//! Portal clock — the single source of "now".
//!
//! Every timestamp the engine writes (creation, resolution) and every
//! expiry check flows through one of these, so tests can pin time with
//! `Fixed` instead of racing the wall clock.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Wall-clock time. Used by the runner.
    System,
    /// A pinned instant. Used by tests.
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}
