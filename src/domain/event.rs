//! Skiers, resorts, and lift usage events.

use crate::domain::tier::TierId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a skier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkierId(pub u64);

impl fmt::Display for SkierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skier-{}", self.0)
    }
}

/// Identifier of a ski resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResortId(pub u64);

impl fmt::Display for ResortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resort-{}", self.0)
    }
}

/// Read-only view of a skier as the validator needs it: the assigned tier
/// (if any) and the set of resorts the skier is partnered with.
///
/// Partnered resorts are exempt from the days-in-row rule only; every other
/// rule still applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skier {
    /// The skier's identifier.
    pub id: SkierId,
    /// Assigned subscription tier, if any.
    pub tier: Option<TierId>,
    /// Resorts this skier is partnered with.
    pub partnered_resorts: BTreeSet<ResortId>,
}

impl Skier {
    /// Create a skier with a tier and no partnered resorts.
    pub fn new(id: SkierId, tier: TierId) -> Self {
        Self {
            id,
            tier: Some(tier),
            partnered_resorts: BTreeSet::new(),
        }
    }

    /// Create a skier without an assigned tier.
    pub fn without_tier(id: SkierId) -> Self {
        Self {
            id,
            tier: None,
            partnered_resorts: BTreeSet::new(),
        }
    }

    /// Add a partnered resort.
    pub fn with_partnered_resort(mut self, resort: ResortId) -> Self {
        self.partnered_resorts.insert(resort);
        self
    }

    /// Whether this skier is partnered with the given resort.
    pub fn is_partnered_with(&self, resort: ResortId) -> bool {
        self.partnered_resorts.contains(&resort)
    }
}

/// An accepted lift usage event.
///
/// Created only through a successful validation, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    /// Who used the lift.
    pub skier: SkierId,
    /// Where the lift was used.
    pub resort: ResortId,
    /// When the lift was used.
    pub timestamp: DateTime<Utc>,
}

impl UsageEvent {
    /// Create a usage event.
    pub fn new(skier: SkierId, resort: ResortId, timestamp: DateTime<Utc>) -> Self {
        Self {
            skier,
            resort,
            timestamp,
        }
    }
}

/// A candidate usage event awaiting validation.
///
/// Same shape as [`UsageEvent`], but not yet accepted. When `timestamp` is
/// `None` the validator substitutes its reference instant ("now").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUsage {
    /// Who wants to use the lift.
    pub skier: SkierId,
    /// Where the lift would be used.
    pub resort: ResortId,
    /// Requested timestamp; defaults to validation time when omitted.
    pub timestamp: Option<DateTime<Utc>>,
}

impl CandidateUsage {
    /// Candidate for "now": the timestamp is resolved at validation time.
    pub fn now(skier: SkierId, resort: ResortId) -> Self {
        Self {
            skier,
            resort,
            timestamp: None,
        }
    }

    /// Candidate for an explicit timestamp.
    pub fn at(skier: SkierId, resort: ResortId, timestamp: DateTime<Utc>) -> Self {
        Self {
            skier,
            resort,
            timestamp: Some(timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partnered_membership() {
        let skier = Skier::new(SkierId(1), TierId::new("DEF")).with_partnered_resort(ResortId(7));

        assert!(skier.is_partnered_with(ResortId(7)));
        assert!(!skier.is_partnered_with(ResortId(8)));
    }

    #[test]
    fn test_skier_without_tier() {
        let skier = Skier::without_tier(SkierId(2));
        assert!(skier.tier.is_none());
        assert!(skier.partnered_resorts.is_empty());
    }

    #[test]
    fn test_candidate_timestamp_default() {
        let candidate = CandidateUsage::now(SkierId(1), ResortId(1));
        assert!(candidate.timestamp.is_none());

        let ts = Utc::now();
        let dated = CandidateUsage::at(SkierId(1), ResortId(1), ts);
        assert_eq!(dated.timestamp, Some(ts));
    }

    #[test]
    fn test_usage_event_serde_round_trip() {
        let event = UsageEvent::new(SkierId(3), ResortId(9), Utc::now());
        let json = serde_json::to_string(&event).unwrap();
        let back: UsageEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
