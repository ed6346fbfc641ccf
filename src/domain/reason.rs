//! Rejection reasons surfaced by the validation pipeline.

use std::fmt;

/// Why a candidate usage event was rejected.
///
/// All variants are deterministic validation failures, not transient faults;
/// none are retried internally. The pipeline reports only the first rejecting
/// rule's reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The candidate's timestamp is after the reference instant.
    FutureDate,
    /// The daily usage count for the candidate's date is exhausted.
    DailyLimitExceeded {
        /// The tier's daily limit.
        limit: u32,
    },
    /// The monthly usage count for the candidate's month is exhausted.
    MonthlyLimitExceeded {
        /// The tier's monthly limit.
        limit: u32,
    },
    /// The skier has already used lifts on too many consecutive days.
    DaysInRowExceeded {
        /// The tier's consecutive-day limit.
        limit: u32,
    },
    /// The weekend usage count for the candidate's ISO week is exhausted.
    WeekendLimitExceeded {
        /// The tier's weekend limit.
        limit: u32,
    },
    /// The skier has no tier assigned, so no limits could be loaded.
    MissingTier,
    /// The skier is not known to the directory.
    UnknownSkier,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::FutureDate => {
                write!(f, "ski lift cannot be used in the future")
            }
            RejectionReason::DailyLimitExceeded { limit } => {
                write!(f, "ski lift can only be used {} times per day", limit)
            }
            RejectionReason::MonthlyLimitExceeded { limit } => {
                write!(f, "ski lift can only be used {} times per month", limit)
            }
            RejectionReason::DaysInRowExceeded { limit } => {
                write!(f, "ski lift can only be used {} days in a row", limit)
            }
            RejectionReason::WeekendLimitExceeded { limit } => {
                write!(f, "ski lift can only be used {} times during a weekend", limit)
            }
            RejectionReason::MissingTier => {
                write!(f, "skier has no tier assigned")
            }
            RejectionReason::UnknownSkier => {
                write!(f, "skier is not registered")
            }
        }
    }
}

impl std::error::Error for RejectionReason {}
