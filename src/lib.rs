//! # lift-quota
//!
//! Usage-quota validation for ski-lift events.
//!
//! This crate decides, at submission time, whether a candidate lift usage is
//! admissible under the quota rules of the skier's subscription tier: a
//! daily count, a monthly count, a weekend count per ISO week, and a
//! consecutive-day streak limit. Skiers partnered with a resort are exempt
//! from the streak rule at that resort; every other rule still applies.
//!
//! The crate is transport- and storage-agnostic. It consumes four ports
//! ([`UsageHistory`], [`TierCatalog`], [`SkierDirectory`], [`Clock`]) and
//! exposes a single decision: [`QuotaValidator::validate`] returns either
//! the resolved [`UsageEvent`] to persist or the first [`RejectionReason`].
//! In-memory adapters are provided for tests and single-process use.
//!
//! ## Quick Start
//!
//! ```rust
//! use lift_quota::{
//!     CandidateUsage, InMemorySkierDirectory, InMemoryTierCatalog, InMemoryUsageLog,
//!     QuotaValidator, ResortId, Skier, SkierId, TierId, UsageStore,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), lift_quota::RejectionReason> {
//! let log = Arc::new(InMemoryUsageLog::new());
//! let tiers = Arc::new(InMemoryTierCatalog::with_standard_tiers());
//! let skiers = Arc::new(InMemorySkierDirectory::new());
//! skiers.insert(Skier::new(SkierId(1), TierId::new("DEF")));
//!
//! let validator = QuotaValidator::new(log.clone(), tiers, skiers);
//!
//! let event = validator.validate(&CandidateUsage::now(SkierId(1), ResortId(1)))?;
//! log.append(event); // persist only on admit
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrent submissions
//!
//! `validate` is side-effect free, so two concurrent candidates for the same
//! skier can both pass against the same pre-submission history. Wrap the
//! validator in an [`AdmissionGate`] to serialize validate-then-persist per
//! skier:
//!
//! ```rust
//! # use lift_quota::{
//! #     AdmissionGate, CandidateUsage, InMemorySkierDirectory, InMemoryTierCatalog,
//! #     InMemoryUsageLog, QuotaValidator, ResortId, Skier, SkierId, TierId,
//! # };
//! # use std::sync::Arc;
//! # let log = Arc::new(InMemoryUsageLog::new());
//! # let tiers = Arc::new(InMemoryTierCatalog::with_standard_tiers());
//! # let skiers = Arc::new(InMemorySkierDirectory::new());
//! # skiers.insert(Skier::new(SkierId(1), TierId::new("DEF")));
//! let validator = QuotaValidator::new(log.clone(), tiers, skiers);
//! let gate = AdmissionGate::new(validator, log);
//!
//! match gate.record(&CandidateUsage::now(SkierId(1), ResortId(1))) {
//!     Ok(event) => println!("recorded at {}", event.timestamp),
//!     Err(reason) => println!("rejected: {}", reason),
//! }
//! ```
//!
//! ## Rule order
//!
//! Rules are evaluated in a fixed, explicitly declared order (future date,
//! daily, monthly, days-in-row, weekend); the first rejection wins and is
//! the only reason reported. See [`standard_rules`] for the declaration and
//! [`QuotaValidator::builder`] for replacing the list or its policies.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - port adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    event::{CandidateUsage, ResortId, Skier, SkierId, UsageEvent},
    reason::RejectionReason,
    tier::{TierId, TierLimits},
};

pub use application::{
    gate::AdmissionGate,
    metrics::{Metrics, MetricsSnapshot},
    ports::{Clock, SkierDirectory, TierCatalog, UsageHistory, UsageStore},
    rules::{
        standard_rules, DailyLimitRule, DaysInRowRule, FutureDateRule, MonthlyLimitRule,
        MonthlyWindow, QuotaRule, RuleContext, WeekendLimitRule,
    },
    validator::{BuildError, MissingTierPolicy, QuotaValidator, QuotaValidatorBuilder},
};

pub use infrastructure::{
    clock::SystemClock,
    memory::{InMemorySkierDirectory, InMemoryTierCatalog, InMemoryUsageLog},
};

#[cfg(any(test, feature = "test-helpers"))]
pub use infrastructure::mocks::MockClock;
