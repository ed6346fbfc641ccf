//! Domain layer - pure business logic with no external dependencies.
//!
//! This layer contains the core concepts and invariants of the quota system:
//! - Skier, resort, and tier identifiers
//! - Usage events and candidate submissions
//! - Tier limit configuration
//! - Rejection reasons
//! - Calendar arithmetic (weekends, ISO weeks, streak windows)
//!
//! All types in this layer are pure and easily testable.

pub mod calendar;
pub mod event;
pub mod reason;
pub mod tier;
