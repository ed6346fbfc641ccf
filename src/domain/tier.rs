//! Tier configuration: per-tier usage limits.
//!
//! Each subscription tier carries four limit values. A skier references at
//! most one tier; the catalog holds at most one limits record per tier
//! identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a subscription tier (e.g. `"DEF"`, `"PRO"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TierId(String);

impl TierId {
    /// Create a tier identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TierId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Quota limits attached to one tier.
///
/// `weekend_limit == 0` is the "no weekend restriction" sentinel: the weekend
/// rule never rejects for such tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum lift uses on a single calendar date.
    pub daily_limit: u32,
    /// Maximum lift uses within a calendar month.
    pub monthly_limit: u32,
    /// Maximum consecutive calendar days with at least one use.
    pub days_in_row_limit: u32,
    /// Maximum lift uses on the weekend of one ISO week. Zero means unlimited.
    pub weekend_limit: u32,
}

impl TierLimits {
    /// Create a limits record.
    pub fn new(
        daily_limit: u32,
        monthly_limit: u32,
        days_in_row_limit: u32,
        weekend_limit: u32,
    ) -> Self {
        Self {
            daily_limit,
            monthly_limit,
            days_in_row_limit,
            weekend_limit,
        }
    }

    /// Limits for the standard skier tier.
    pub fn standard() -> Self {
        Self::new(20, 100, 3, 2)
    }

    /// Limits for the professional skier tier. Weekends are unrestricted.
    pub fn professional() -> Self {
        Self::new(40, 200, 4, 0)
    }

    /// Whether the weekend rule applies to this tier at all.
    pub fn weekend_restricted(&self) -> bool {
        self.weekend_limit != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_id_display() {
        let id = TierId::new("PRO");
        assert_eq!(id.to_string(), "PRO");
        assert_eq!(id.as_str(), "PRO");
    }

    #[test]
    fn test_standard_preset() {
        let limits = TierLimits::standard();
        assert_eq!(limits.daily_limit, 20);
        assert_eq!(limits.monthly_limit, 100);
        assert_eq!(limits.days_in_row_limit, 3);
        assert_eq!(limits.weekend_limit, 2);
        assert!(limits.weekend_restricted());
    }

    #[test]
    fn test_professional_weekend_unrestricted() {
        let limits = TierLimits::professional();
        assert_eq!(limits.weekend_limit, 0);
        assert!(!limits.weekend_restricted());
    }

    #[test]
    fn test_limits_serde_round_trip() {
        let limits = TierLimits::new(5, 30, 2, 1);
        let json = serde_json::to_string(&limits).unwrap();
        let back: TierLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limits);
    }
}
