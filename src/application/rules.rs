//! Quota rules evaluated against a candidate usage event.
//!
//! Each rule checks exactly one constraint and is stateless: a pure function
//! of the context it receives. Rules live in an explicit, ordered list (see
//! [`standard_rules`]); the pipeline stops at the first rule that rejects.

use crate::application::ports::UsageHistory;
use crate::domain::calendar::{is_weekend, iso_week_of, streak_window};
use crate::domain::event::{ResortId, SkierId};
use crate::domain::reason::RejectionReason;
use crate::domain::tier::TierLimits;
use chrono::{DateTime, Datelike, Utc};

/// How the monthly rule scopes its count.
///
/// The original system matched the month number regardless of year, which
/// blocks usage in the same month of a *different* year once the limit was
/// ever reached. That behavior is preserved as the default because intent is
/// ambiguous; `YearScoped` opts into month-of-one-year counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthlyWindow {
    /// Match the month number in any year.
    #[default]
    AnyYear,
    /// Match the month of the candidate's calendar year only.
    YearScoped,
}

/// Everything a rule may consult when evaluating one candidate.
///
/// The same context instance is shared by every rule in the pipeline, so all
/// rules see the same resolved timestamp and the same reference instant.
pub struct RuleContext<'a> {
    /// The candidate's skier.
    pub skier: SkierId,
    /// The candidate's resort.
    pub resort: ResortId,
    /// The candidate's resolved timestamp (defaulted to `now` if omitted).
    pub timestamp: DateTime<Utc>,
    /// The reference instant the pipeline was invoked with.
    pub now: DateTime<Utc>,
    /// The skier's tier limits; `None` when no tier is assigned and the
    /// missing-tier policy admits anyway.
    pub limits: Option<&'a TierLimits>,
    /// Whether the skier is partnered with the candidate's resort.
    pub exempt: bool,
    /// Month scoping for the monthly rule.
    pub monthly_window: MonthlyWindow,
    /// Read access to previously accepted events.
    pub history: &'a dyn UsageHistory,
}

/// One quota constraint.
///
/// Implementations must be stateless; all inputs come through the context.
pub trait QuotaRule: Send + Sync {
    /// Stable rule name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this rule needs tier limits to be meaningful.
    ///
    /// Rules that return `false` still run for skiers without a tier when
    /// the missing-tier policy admits.
    fn requires_tier(&self) -> bool {
        true
    }

    /// Evaluate the candidate; `Err` is the rejection that stops the pipeline.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason>;
}

/// Rejects candidates dated after the reference instant.
///
/// Applies unconditionally, tier or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct FutureDateRule;

impl QuotaRule for FutureDateRule {
    fn name(&self) -> &'static str {
        "future_date"
    }

    fn requires_tier(&self) -> bool {
        false
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason> {
        if ctx.timestamp > ctx.now {
            return Err(RejectionReason::FutureDate);
        }
        Ok(())
    }
}

/// Rejects once the calendar-date count reaches the tier's daily limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyLimitRule;

impl QuotaRule for DailyLimitRule {
    fn name(&self) -> &'static str {
        "daily_limit"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason> {
        let Some(limits) = ctx.limits else {
            return Ok(());
        };

        let used = ctx.history.count_on_date(ctx.skier, ctx.timestamp.date_naive());
        if used >= u64::from(limits.daily_limit) {
            return Err(RejectionReason::DailyLimitExceeded {
                limit: limits.daily_limit,
            });
        }
        Ok(())
    }
}

/// Rejects once the month count reaches the tier's monthly limit.
///
/// Month scoping follows [`MonthlyWindow`]; the default counts the month
/// number across all years.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyLimitRule;

impl QuotaRule for MonthlyLimitRule {
    fn name(&self) -> &'static str {
        "monthly_limit"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason> {
        let Some(limits) = ctx.limits else {
            return Ok(());
        };

        let date = ctx.timestamp.date_naive();
        let year = match ctx.monthly_window {
            MonthlyWindow::AnyYear => None,
            MonthlyWindow::YearScoped => Some(date.year()),
        };

        let used = ctx.history.count_in_month(ctx.skier, date.month(), year);
        if used >= u64::from(limits.monthly_limit) {
            return Err(RejectionReason::MonthlyLimitExceeded {
                limit: limits.monthly_limit,
            });
        }
        Ok(())
    }
}

/// Rejects unbroken streaks longer than the tier allows.
///
/// Counts distinct calendar dates with events in `[timestamp - limit days,
/// timestamp)`. Skiers partnered with the candidate's resort bypass this
/// rule entirely; every other rule still applies to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaysInRowRule;

impl QuotaRule for DaysInRowRule {
    fn name(&self) -> &'static str {
        "days_in_row"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason> {
        if ctx.exempt {
            return Ok(());
        }
        let Some(limits) = ctx.limits else {
            return Ok(());
        };

        let (from, to) = streak_window(ctx.timestamp, limits.days_in_row_limit);
        let days_used = ctx.history.distinct_dates_in_range(ctx.skier, from, to);
        if days_used >= u64::from(limits.days_in_row_limit) {
            return Err(RejectionReason::DaysInRowExceeded {
                limit: limits.days_in_row_limit,
            });
        }
        Ok(())
    }
}

/// Rejects weekend candidates once the ISO week's weekend count is exhausted.
///
/// Weekday candidates always pass. A `weekend_limit` of zero means the tier
/// has no weekend restriction and this rule never rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendLimitRule;

impl QuotaRule for WeekendLimitRule {
    fn name(&self) -> &'static str {
        "weekend_limit"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<(), RejectionReason> {
        let Some(limits) = ctx.limits else {
            return Ok(());
        };

        let date = ctx.timestamp.date_naive();
        if !is_weekend(date) || !limits.weekend_restricted() {
            return Ok(());
        }

        let (week, iso_year) = iso_week_of(date);
        let used = ctx.history.weekend_count_in_iso_week(ctx.skier, week, iso_year);
        if used >= u64::from(limits.weekend_limit) {
            return Err(RejectionReason::WeekendLimitExceeded {
                limit: limits.weekend_limit,
            });
        }
        Ok(())
    }
}

/// The standard rule set in its fixed evaluation order.
///
/// Order is declared here and nowhere else: future-date first (cheapest and
/// unconditional), then daily, monthly, days-in-row, weekend. The pipeline
/// reports the first rejection only, so the order is observable behavior.
pub fn standard_rules() -> Vec<Box<dyn QuotaRule>> {
    vec![
        Box::new(FutureDateRule),
        Box::new(DailyLimitRule),
        Box::new(MonthlyLimitRule),
        Box::new(DaysInRowRule),
        Box::new(WeekendLimitRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::UsageStore;
    use crate::domain::event::UsageEvent;
    use chrono::{Duration, TimeZone};

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn context<'a>(
        history: &'a dyn UsageHistory,
        limits: &'a TierLimits,
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> RuleContext<'a> {
        RuleContext {
            skier: SkierId(1),
            resort: ResortId(1),
            timestamp,
            now,
            limits: Some(limits),
            exempt: false,
            monthly_window: MonthlyWindow::AnyYear,
            history,
        }
    }

    fn log_with_events(events: &[DateTime<Utc>]) -> crate::infrastructure::memory::InMemoryUsageLog {
        let log = crate::infrastructure::memory::InMemoryUsageLog::new();
        for &event_ts in events {
            log.append(UsageEvent::new(SkierId(1), ResortId(1), event_ts));
        }
        log
    }

    #[test]
    fn test_future_date_rejects_later_timestamp() {
        let log = log_with_events(&[]);
        let limits = TierLimits::standard();
        let now = ts(2024, 1, 10, 12);

        let ctx = context(&log, &limits, now + Duration::seconds(1), now);
        assert_eq!(
            FutureDateRule.evaluate(&ctx),
            Err(RejectionReason::FutureDate)
        );

        let ctx = context(&log, &limits, now, now);
        assert_eq!(FutureDateRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_future_date_runs_without_tier() {
        assert!(!FutureDateRule.requires_tier());
        assert!(DailyLimitRule.requires_tier());

        let log = log_with_events(&[]);
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::standard();
        let mut ctx = context(&log, &limits, now + Duration::hours(1), now);
        ctx.limits = None;
        assert_eq!(
            FutureDateRule.evaluate(&ctx),
            Err(RejectionReason::FutureDate)
        );
    }

    #[test]
    fn test_daily_limit_boundary() {
        let now = ts(2024, 1, 10, 18);
        let limits = TierLimits::new(3, 100, 30, 0);

        // Two uses today, limit three: still admissible.
        let log = log_with_events(&[ts(2024, 1, 10, 9), ts(2024, 1, 10, 11)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(DailyLimitRule.evaluate(&ctx), Ok(()));

        // Third use recorded: the fourth candidate is rejected.
        log.append(UsageEvent::new(SkierId(1), ResortId(1), ts(2024, 1, 10, 14)));
        let ctx = context(&log, &limits, now, now);
        assert_eq!(
            DailyLimitRule.evaluate(&ctx),
            Err(RejectionReason::DailyLimitExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_daily_limit_ignores_other_dates() {
        let now = ts(2024, 1, 10, 18);
        let limits = TierLimits::new(1, 100, 30, 0);

        let log = log_with_events(&[ts(2024, 1, 9, 9), ts(2024, 1, 11, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(DailyLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_monthly_limit_matches_month_of_any_year() {
        let now = ts(2024, 3, 15, 12);
        let limits = TierLimits::new(20, 2, 30, 0);

        // Two March events from a *previous* year exhaust the default window.
        let log = log_with_events(&[ts(2023, 3, 1, 9), ts(2022, 3, 20, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(
            MonthlyLimitRule.evaluate(&ctx),
            Err(RejectionReason::MonthlyLimitExceeded { limit: 2 })
        );

        // Year-scoped counting sees zero March 2024 events.
        let mut ctx = context(&log, &limits, now, now);
        ctx.monthly_window = MonthlyWindow::YearScoped;
        assert_eq!(MonthlyLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_monthly_limit_other_months_do_not_count() {
        let now = ts(2024, 3, 15, 12);
        let limits = TierLimits::new(20, 1, 30, 0);

        let log = log_with_events(&[ts(2024, 2, 28, 9), ts(2024, 4, 1, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(MonthlyLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_days_in_row_rejects_full_streak() {
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::new(20, 100, 3, 0);

        // Events on each of the three previous days.
        let log = log_with_events(&[ts(2024, 1, 7, 13), ts(2024, 1, 8, 9), ts(2024, 1, 9, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(
            DaysInRowRule.evaluate(&ctx),
            Err(RejectionReason::DaysInRowExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_days_in_row_gap_resets_streak() {
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::new(20, 100, 3, 0);

        // Only two distinct dates inside the three-day window; the event on
        // the 6th is outside `[now - 3 days, now)`.
        let log = log_with_events(&[ts(2024, 1, 6, 9), ts(2024, 1, 8, 9), ts(2024, 1, 9, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(DaysInRowRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_days_in_row_counts_distinct_dates_not_events() {
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::new(20, 100, 3, 0);

        // Five events but only two distinct dates.
        let log = log_with_events(&[
            ts(2024, 1, 8, 9),
            ts(2024, 1, 8, 10),
            ts(2024, 1, 8, 11),
            ts(2024, 1, 9, 9),
            ts(2024, 1, 9, 15),
        ]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(DaysInRowRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_days_in_row_partnered_resort_bypasses() {
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::new(20, 100, 3, 0);

        let log = log_with_events(&[ts(2024, 1, 7, 9), ts(2024, 1, 8, 9), ts(2024, 1, 9, 9)]);
        let mut ctx = context(&log, &limits, now, now);
        ctx.exempt = true;
        assert_eq!(DaysInRowRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_weekend_limit_only_applies_on_weekend() {
        // 2024-01-08 is a Monday.
        let now = ts(2024, 1, 8, 12);
        let limits = TierLimits::new(20, 100, 30, 1);

        let log = log_with_events(&[ts(2024, 1, 6, 9), ts(2024, 1, 7, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(WeekendLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_weekend_limit_rejects_on_saturday() {
        // 2024-01-06 is a Saturday in ISO week 1.
        let now = ts(2024, 1, 6, 16);
        let limits = TierLimits::new(20, 100, 30, 2);

        let log = log_with_events(&[ts(2024, 1, 6, 9), ts(2024, 1, 7, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(
            WeekendLimitRule.evaluate(&ctx),
            Err(RejectionReason::WeekendLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_weekend_limit_zero_never_rejects() {
        let now = ts(2024, 1, 6, 16);
        let limits = TierLimits::new(20, 100, 30, 0);

        let log = log_with_events(&[
            ts(2024, 1, 6, 9),
            ts(2024, 1, 6, 10),
            ts(2024, 1, 6, 11),
            ts(2024, 1, 7, 9),
        ]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(WeekendLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_weekend_limit_other_iso_week_does_not_count() {
        // Saturday 2024-01-13 (ISO week 2); the prior weekend sits in week 1.
        let now = ts(2024, 1, 13, 10);
        let limits = TierLimits::new(20, 100, 30, 2);

        let log = log_with_events(&[ts(2024, 1, 6, 9), ts(2024, 1, 7, 9)]);
        let ctx = context(&log, &limits, now, now);
        assert_eq!(WeekendLimitRule.evaluate(&ctx), Ok(()));
    }

    #[test]
    fn test_standard_rules_order() {
        let names: Vec<&str> = standard_rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "future_date",
                "daily_limit",
                "monthly_limit",
                "days_in_row",
                "weekend_limit"
            ]
        );
    }

    #[test]
    fn test_rules_without_limits_admit() {
        let log = log_with_events(&[ts(2024, 1, 10, 9)]);
        let now = ts(2024, 1, 10, 12);
        let limits = TierLimits::new(0, 0, 0, 1);
        let mut ctx = context(&log, &limits, now, now);
        ctx.limits = None;

        for rule in standard_rules() {
            assert_eq!(rule.evaluate(&ctx), Ok(()), "rule {}", rule.name());
        }
    }
}
