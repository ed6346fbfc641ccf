//! The validation pipeline.
//!
//! [`QuotaValidator`] orchestrates the rule set against one candidate event
//! and yields a single admit/reject outcome. It is side-effect free: the
//! caller (or the [`AdmissionGate`](crate::application::gate::AdmissionGate))
//! persists the event only on admit.

use crate::application::metrics::Metrics;
use crate::application::ports::{Clock, SkierDirectory, TierCatalog, UsageHistory};
use crate::application::rules::{standard_rules, MonthlyWindow, QuotaRule, RuleContext};
use crate::domain::event::{CandidateUsage, UsageEvent};
use crate::domain::reason::RejectionReason;
use crate::infrastructure::clock::SystemClock;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What to do when a skier has no tier assigned (or the tier has no limits
/// record in the catalog).
///
/// The original system dereferenced the missing configuration and crashed;
/// the choice is now explicit and defaults to fail-closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTierPolicy {
    /// Reject the candidate with [`RejectionReason::MissingTier`].
    #[default]
    Reject,
    /// Admit without quota rules. Rules that need no tier configuration
    /// (the future-date check) still run.
    Admit,
}

/// Error returned when building a [`QuotaValidator`] fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The rule list was replaced with an empty one.
    EmptyRuleSet,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyRuleSet => write!(f, "rule set must not be empty"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Decides whether candidate usage events are admissible.
///
/// Holds the history, tier, and skier ports, a clock, and an explicitly
/// ordered rule list. Evaluation stops at the first rejecting rule; if no
/// rule rejects, the resolved [`UsageEvent`] is returned for the caller to
/// persist.
pub struct QuotaValidator {
    history: Arc<dyn UsageHistory>,
    tiers: Arc<dyn TierCatalog>,
    skiers: Arc<dyn SkierDirectory>,
    clock: Arc<dyn Clock>,
    rules: Vec<Box<dyn QuotaRule>>,
    monthly_window: MonthlyWindow,
    missing_tier_policy: MissingTierPolicy,
    metrics: Metrics,
}

impl QuotaValidator {
    /// Create a validator with the standard rule set, the system clock, and
    /// default policies.
    pub fn new(
        history: Arc<dyn UsageHistory>,
        tiers: Arc<dyn TierCatalog>,
        skiers: Arc<dyn SkierDirectory>,
    ) -> Self {
        Self {
            history,
            tiers,
            skiers,
            clock: Arc::new(SystemClock::new()),
            rules: standard_rules(),
            monthly_window: MonthlyWindow::default(),
            missing_tier_policy: MissingTierPolicy::default(),
            metrics: Metrics::new(),
        }
    }

    /// Start building a validator with custom configuration.
    pub fn builder(
        history: Arc<dyn UsageHistory>,
        tiers: Arc<dyn TierCatalog>,
        skiers: Arc<dyn SkierDirectory>,
    ) -> QuotaValidatorBuilder {
        QuotaValidatorBuilder {
            history,
            tiers,
            skiers,
            clock: None,
            rules: None,
            monthly_window: MonthlyWindow::default(),
            missing_tier_policy: MissingTierPolicy::default(),
        }
    }

    /// Validate one candidate.
    ///
    /// Resolves the reference instant once, defaults the candidate's
    /// timestamp to it when omitted, and evaluates the rules in their
    /// declared order. Returns the resolved event on admit or the first
    /// rejection. Applying this twice to the same candidate against
    /// unchanged history returns the same outcome; nothing is persisted.
    pub fn validate(&self, candidate: &CandidateUsage) -> Result<UsageEvent, RejectionReason> {
        let now = self.clock.now();
        let timestamp = candidate.timestamp.unwrap_or(now);

        let outcome = self.decide(candidate, timestamp, now);
        match &outcome {
            Ok(event) => {
                self.metrics.record_admitted();
                trace!(skier = %event.skier, resort = %event.resort, "candidate admitted");
            }
            Err(reason) => {
                self.metrics.record_rejected();
                debug!(skier = %candidate.skier, resort = %candidate.resort, %reason, "candidate rejected");
            }
        }
        outcome
    }

    fn decide(
        &self,
        candidate: &CandidateUsage,
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<UsageEvent, RejectionReason> {
        let skier = self
            .skiers
            .lookup(candidate.skier)
            .ok_or(RejectionReason::UnknownSkier)?;

        let exempt = skier.is_partnered_with(candidate.resort);
        let limits = skier.tier.as_ref().and_then(|tier| self.tiers.limits(tier));

        if limits.is_none() && self.missing_tier_policy == MissingTierPolicy::Reject {
            return Err(RejectionReason::MissingTier);
        }

        let ctx = RuleContext {
            skier: candidate.skier,
            resort: candidate.resort,
            timestamp,
            now,
            limits: limits.as_ref(),
            exempt,
            monthly_window: self.monthly_window,
            history: self.history.as_ref(),
        };

        for rule in &self.rules {
            if ctx.limits.is_none() && rule.requires_tier() {
                continue;
            }
            if let Err(reason) = rule.evaluate(&ctx) {
                debug!(rule = rule.name(), skier = %candidate.skier, "rule rejected candidate");
                return Err(reason);
            }
        }

        Ok(UsageEvent::new(candidate.skier, candidate.resort, timestamp))
    }

    /// The rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Get a reference to the validation metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

/// Builder for a [`QuotaValidator`].
pub struct QuotaValidatorBuilder {
    history: Arc<dyn UsageHistory>,
    tiers: Arc<dyn TierCatalog>,
    skiers: Arc<dyn SkierDirectory>,
    clock: Option<Arc<dyn Clock>>,
    rules: Option<Vec<Box<dyn QuotaRule>>>,
    monthly_window: MonthlyWindow,
    missing_tier_policy: MissingTierPolicy,
}

impl QuotaValidatorBuilder {
    /// Use a custom clock (a `MockClock` in tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the standard rule list. Order is evaluation order.
    pub fn with_rules(mut self, rules: Vec<Box<dyn QuotaRule>>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Set the month scoping for the monthly rule.
    pub fn with_monthly_window(mut self, window: MonthlyWindow) -> Self {
        self.monthly_window = window;
        self
    }

    /// Set the policy for skiers without tier configuration.
    pub fn with_missing_tier_policy(mut self, policy: MissingTierPolicy) -> Self {
        self.missing_tier_policy = policy;
        self
    }

    /// Build the validator.
    ///
    /// # Errors
    /// Returns [`BuildError::EmptyRuleSet`] if the rule list was replaced
    /// with an empty one.
    pub fn build(self) -> Result<QuotaValidator, BuildError> {
        let rules = self.rules.unwrap_or_else(standard_rules);
        if rules.is_empty() {
            return Err(BuildError::EmptyRuleSet);
        }

        Ok(QuotaValidator {
            history: self.history,
            tiers: self.tiers,
            skiers: self.skiers,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            rules,
            monthly_window: self.monthly_window,
            missing_tier_policy: self.missing_tier_policy,
            metrics: Metrics::new(),
        })
    }
}
