//! Mock adapters for testing.

mod clock;

pub use clock::MockClock;
