//! Admission gate: serialized validate-then-persist.
//!
//! History queries and persistence are not one atomic transaction, so two
//! concurrent candidates for the same skier could both validate against the
//! same pre-submission history and both be persisted, transiently exceeding
//! a limit. The gate closes that window with per-skier mutual exclusion:
//! candidates for one skier serialize, distinct skiers never contend.

use crate::application::ports::UsageStore;
use crate::application::validator::QuotaValidator;
use crate::domain::event::{CandidateUsage, SkierId, UsageEvent};
use crate::domain::reason::RejectionReason;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Validates candidates and persists admitted events under a per-skier lock.
pub struct AdmissionGate {
    validator: QuotaValidator,
    store: Arc<dyn UsageStore>,
    locks: DashMap<SkierId, Arc<Mutex<()>>>,
}

impl AdmissionGate {
    /// Create a gate over a validator and the store it should append to.
    ///
    /// The store must be the same one backing the validator's history port,
    /// or admitted events will not be visible to later validations.
    pub fn new(validator: QuotaValidator, store: Arc<dyn UsageStore>) -> Self {
        Self {
            validator,
            store,
            locks: DashMap::new(),
        }
    }

    /// Validate the candidate and, on admit, persist the resolved event.
    ///
    /// Holds the skier's lock across both steps so a concurrent candidate
    /// for the same skier observes the appended event.
    pub fn record(&self, candidate: &CandidateUsage) -> Result<UsageEvent, RejectionReason> {
        let lock = self
            .locks
            .entry(candidate.skier)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let event = self.validator.validate(candidate)?;
        self.store.append(event.clone());
        debug!(skier = %event.skier, resort = %event.resort, "usage event recorded");
        Ok(event)
    }

    /// Get a reference to the underlying validator.
    pub fn validator(&self) -> &QuotaValidator {
        &self.validator
    }
}
