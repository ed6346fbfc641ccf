//! In-memory adapters backed by concurrent maps.
//!
//! These implement the application ports over `DashMap` for tests, demos,
//! and single-process deployments. An integrating service would typically
//! replace them with database-backed implementations of the same ports.

use crate::application::ports::{SkierDirectory, TierCatalog, UsageHistory, UsageStore};
use crate::domain::calendar::{is_weekend, iso_week_of};
use crate::domain::event::{Skier, SkierId, UsageEvent};
use crate::domain::tier::{TierId, TierLimits};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use dashmap::DashMap;
use std::collections::BTreeSet;

/// Concurrent in-memory log of accepted usage events.
///
/// Implements both [`UsageHistory`] (the validator's read side) and
/// [`UsageStore`] (the gate's write side), so one instance can back a whole
/// validate-then-persist loop.
#[derive(Debug, Default)]
pub struct InMemoryUsageLog {
    events: DashMap<SkierId, Vec<UsageEvent>>,
}

impl InMemoryUsageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }

    /// Total number of stored events across all skiers.
    pub fn len(&self) -> usize {
        self.events.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one skier's events, in insertion order.
    pub fn events_for(&self, skier: SkierId) -> Vec<UsageEvent> {
        self.events
            .get(&skier)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn count_matching(&self, skier: SkierId, pred: impl Fn(&UsageEvent) -> bool) -> u64 {
        self.events
            .get(&skier)
            .map(|entry| entry.value().iter().filter(|event| pred(event)).count() as u64)
            .unwrap_or(0)
    }
}

impl UsageHistory for InMemoryUsageLog {
    fn count_on_date(&self, skier: SkierId, date: NaiveDate) -> u64 {
        self.count_matching(skier, |event| event.timestamp.date_naive() == date)
    }

    fn count_in_month(&self, skier: SkierId, month: u32, year: Option<i32>) -> u64 {
        self.count_matching(skier, |event| {
            let date = event.timestamp.date_naive();
            date.month() == month && year.map_or(true, |y| date.year() == y)
        })
    }

    fn distinct_dates_in_range(
        &self,
        skier: SkierId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> u64 {
        self.events
            .get(&skier)
            .map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|event| event.timestamp >= from && event.timestamp < to)
                    .map(|event| event.timestamp.date_naive())
                    .collect::<BTreeSet<_>>()
                    .len() as u64
            })
            .unwrap_or(0)
    }

    fn weekend_count_in_iso_week(&self, skier: SkierId, week: u32, iso_year: i32) -> u64 {
        self.count_matching(skier, |event| {
            let date = event.timestamp.date_naive();
            is_weekend(date) && iso_week_of(date) == (week, iso_year)
        })
    }
}

impl UsageStore for InMemoryUsageLog {
    fn append(&self, event: UsageEvent) {
        self.events.entry(event.skier).or_default().push(event);
    }
}

/// Concurrent in-memory tier catalog.
///
/// Inserting a tier twice replaces the previous record, keeping the
/// one-limits-record-per-tier invariant.
#[derive(Debug, Default)]
pub struct InMemoryTierCatalog {
    tiers: DashMap<TierId, TierLimits>,
}

impl InMemoryTierCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            tiers: DashMap::new(),
        }
    }

    /// Catalog preloaded with the two stock tiers: `DEF`
    /// ([`TierLimits::standard`]) and `PRO` ([`TierLimits::professional`]).
    pub fn with_standard_tiers() -> Self {
        let catalog = Self::new();
        catalog.insert(TierId::new("DEF"), TierLimits::standard());
        catalog.insert(TierId::new("PRO"), TierLimits::professional());
        catalog
    }

    /// Register or replace a tier's limits.
    pub fn insert(&self, tier: TierId, limits: TierLimits) {
        self.tiers.insert(tier, limits);
    }
}

impl TierCatalog for InMemoryTierCatalog {
    fn limits(&self, tier: &TierId) -> Option<TierLimits> {
        self.tiers.get(tier).map(|entry| *entry.value())
    }
}

/// Concurrent in-memory skier directory.
#[derive(Debug, Default)]
pub struct InMemorySkierDirectory {
    skiers: DashMap<SkierId, Skier>,
}

impl InMemorySkierDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            skiers: DashMap::new(),
        }
    }

    /// Register or replace a skier.
    pub fn insert(&self, skier: Skier) {
        self.skiers.insert(skier.id, skier);
    }
}

impl SkierDirectory for InMemorySkierDirectory {
    fn lookup(&self, skier: SkierId) -> Option<Skier> {
        self.skiers.get(&skier).map(|entry| entry.value().clone())
    }
}
