//! Infrastructure layer - adapters for the application ports.
//!
//! This layer provides:
//! - Clock adapters (system time vs mock)
//! - In-memory stores (dashmap-backed history, tier catalog, skier directory)

pub mod clock;
pub mod memory;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides a controllable clock for deterministic
/// testing of the calendar-sensitive rules.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// lift-quota = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
