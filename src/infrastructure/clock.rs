//! Clock adapters for time operations.
//!
//! Provides the production `SystemClock`. See `MockClock` (in
//! `crate::infrastructure::mocks`) for a controllable test clock, available
//! with the `test-helpers` feature or in test builds.

use crate::application::ports::Clock;
use chrono::{DateTime, Utc};

/// System clock implementation using `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
