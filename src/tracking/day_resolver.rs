//! Logical work-day resolution.
//!
//! Events in the small hours of the morning belong to the previous
//! work-day: a worker who checks out at 1 a.m. is credited to the day
//! they checked in on. The cutover hour comes from the tracking policy
//! (6 a.m. unless configured otherwise).

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::config::TrackingPolicy;

/// Resolves the logical work-day an event timestamp belongs to.
///
/// Timestamps at or after the cutover hour map to their own calendar
/// date; earlier timestamps map to the previous calendar date.
///
/// # Arguments
///
/// * `timestamp` - The event time (local wall clock)
/// * `policy` - The tracking policy supplying the cutover hour
///
/// # Examples
///
/// ```
/// use attendance_engine::config::TrackingPolicy;
/// use attendance_engine::tracking::resolve_work_day;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let policy = TrackingPolicy::default();
/// let late = NaiveDateTime::parse_from_str("2026-03-03 01:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(
///     resolve_work_day(late, &policy),
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
/// );
/// ```
pub fn resolve_work_day(timestamp: NaiveDateTime, policy: &TrackingPolicy) -> NaiveDate {
    if timestamp.hour() < policy.day_cutover_hour {
        timestamp
            .date()
            .pred_opt()
            .expect("date within supported range")
    } else {
        timestamp.date()
    }
}

/// Returns the last instant of a logical work-day (23:59:59.999 local).
///
/// Used as the synthetic check-out timestamp when a cross-day logout
/// closes the previous day's record.
pub fn work_day_close(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid end-of-day time")
}
