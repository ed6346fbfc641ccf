//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the
//! application layer needs. Infrastructure adapters implement these ports;
//! an integrating service can also implement them over its own database.

use crate::domain::event::{Skier, SkierId, UsageEvent};
use crate::domain::tier::{TierId, TierLimits};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::Debug;

/// Port for obtaining the reference instant.
///
/// The pipeline threads "now" through every rule explicitly, so a test clock
/// makes the whole validation deterministic. Infrastructure provides
/// `SystemClock` and, for tests, `MockClock`.
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Port for read-only queries over previously accepted usage events.
///
/// All queries are scoped to one skier. They must reflect only events that
/// have already been accepted and persisted, never candidates in flight.
pub trait UsageHistory: Send + Sync {
    /// Number of events whose timestamp falls on the given calendar date.
    fn count_on_date(&self, skier: SkierId, date: NaiveDate) -> u64;

    /// Number of events whose timestamp falls in the given month number.
    ///
    /// With `year: None` the calendar year is ignored and any year matches;
    /// with `Some(y)` only that year's month counts. See
    /// [`MonthlyWindow`](crate::application::rules::MonthlyWindow) for why
    /// both behaviors exist.
    fn count_in_month(&self, skier: SkierId, month: u32, year: Option<i32>) -> u64;

    /// Number of distinct calendar dates among events with timestamp in
    /// the half-open window `[from, to)`.
    fn distinct_dates_in_range(&self, skier: SkierId, from: DateTime<Utc>, to: DateTime<Utc>)
        -> u64;

    /// Number of events on the Saturday or Sunday of the given ISO week.
    fn weekend_count_in_iso_week(&self, skier: SkierId, week: u32, iso_year: i32) -> u64;
}

/// Port for tier limit lookup.
///
/// At most one limits record exists per tier identifier. Returns `None` for
/// unknown tiers; the pipeline maps that to its missing-tier policy.
pub trait TierCatalog: Send + Sync {
    /// Look up the limits for a tier.
    fn limits(&self, tier: &TierId) -> Option<TierLimits>;
}

/// Port for skier lookup.
///
/// Exposes the two facts the validator needs about a skier: the assigned
/// tier and the partnered-resort set.
pub trait SkierDirectory: Send + Sync {
    /// Look up a skier by identifier.
    fn lookup(&self, skier: SkierId) -> Option<Skier>;
}

/// Port for persisting accepted usage events.
///
/// Only the admission gate writes through this port, and only after an
/// admit. Events are immutable once appended.
pub trait UsageStore: Send + Sync {
    /// Append an accepted event.
    fn append(&self, event: UsageEvent);
}
