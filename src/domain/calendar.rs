//! Calendar arithmetic shared by the quota rules.
//!
//! The rules reason about calendar dates in the reference timezone (UTC),
//! ISO week numbering for weekends, and half-open datetime windows for
//! consecutive-day streaks.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Whether the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// ISO week number and ISO week-based year for the date.
///
/// The ISO year can differ from the calendar year for dates in week 1 or
/// week 52/53 near a year boundary; weekend counting must scope by the ISO
/// year or those weeks split incorrectly.
pub fn iso_week_of(date: NaiveDate) -> (u32, i32) {
    let week = date.iso_week();
    (week.week(), week.year())
}

/// Half-open window `[ts - days, ts)` used by the days-in-row rule.
///
/// Bounds are datetimes, not dates: an event earlier on the candidate's own
/// day is inside the window, exactly as many days back as the limit allows.
pub fn streak_window(ts: DateTime<Utc>, days: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    (ts - Duration::days(i64::from(days)), ts)
}
