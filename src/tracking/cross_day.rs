//! Cross-day logout resolution.
//!
//! A worker who stays checked in past midnight and logs out in the
//! small hours leaves an open session on the previous day's record.
//! The previous day is closed at its own boundary rather than at the
//! logout time, and the logout spills over as a synthetic check-in on
//! the new day so the post-midnight stretch is still credited.

use chrono::{NaiveDateTime, Timelike};

use super::day_resolver::work_day_close;
use super::hours;
use crate::config::TrackingPolicy;
use crate::models::{
    AttendanceRecord, CrossDayAdjustment, EntryKind, EntrySource, SessionStatus, TimeEntry,
};

/// Closes a previous-day record left open across midnight.
///
/// When the record's status is `checked_in`, this appends a synthetic
/// `check_out` at the record day's last instant (23:59:59.999, source
/// `auto`), moves the status to `auto_checkout`, marks the day
/// completed, stores the adjustment triple, and recomputes the totals.
///
/// # Arguments
///
/// * `record` - The previous day's record
/// * `logout_time` - The logout that triggered the close; becomes the
///   adjustment's original event time and spillover check-in time
///
/// # Returns
///
/// The recorded adjustment, or `None` when the record holds no open
/// check-in (the caller falls back to normal logout handling; the
/// record is left untouched).
pub fn close_at_day_boundary(
    record: &mut AttendanceRecord,
    logout_time: NaiveDateTime,
) -> Option<CrossDayAdjustment> {
    if record.status != SessionStatus::CheckedIn {
        return None;
    }

    let boundary = work_day_close(record.day);
    record
        .entries
        .push(TimeEntry::new(EntryKind::CheckOut, boundary, EntrySource::Auto));
    record.last_check_out = Some(boundary);
    record.status = SessionStatus::AutoCheckout;
    record.is_completed = true;

    let adjustment = CrossDayAdjustment {
        original_event_time: logout_time,
        adjusted_boundary_time: boundary,
        spillover_check_in_time: logout_time,
    };
    record.cross_day_adjustment = Some(adjustment.clone());

    hours::recompute(record);
    Some(adjustment)
}

/// Returns the timestamp for the spillover check-in on the logout's own
/// calendar date, when the logout falls in the small hours before the
/// cutover. A later logout (say 09:00 the next morning) closes the
/// previous day without opening a new one.
pub fn spillover_check_in(
    logout_time: NaiveDateTime,
    policy: &TrackingPolicy,
) -> Option<NaiveDateTime> {
    (logout_time.hour() < policy.day_cutover_hour).then_some(logout_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn open_record_checked_in_at(time_str: &str) -> AttendanceRecord {
        let mut record = AttendanceRecord::new("worker_001", make_date("2026-03-02"));
        let check_in = make_datetime("2026-03-02", time_str);
        record.entries.push(TimeEntry::new(
            EntryKind::CheckIn,
            check_in,
            EntrySource::Login,
        ));
        record.first_check_in = Some(check_in);
        record.status = SessionStatus::CheckedIn;
        record
    }

    #[test]
    fn test_close_appends_boundary_check_out() {
        let mut record = open_record_checked_in_at("22:00:00");
        let logout = make_datetime("2026-03-03", "01:30:00");

        let adjustment = close_at_day_boundary(&mut record, logout).unwrap();

        let boundary = make_date("2026-03-02").and_hms_milli_opt(23, 59, 59, 999).unwrap();
        let last = record.last_entry().unwrap();
        assert_eq!(last.kind, EntryKind::CheckOut);
        assert_eq!(last.timestamp, boundary);
        assert_eq!(last.source, EntrySource::Auto);

        assert_eq!(record.status, SessionStatus::AutoCheckout);
        assert!(record.is_completed);
        assert_eq!(record.last_check_out, Some(boundary));

        assert_eq!(adjustment.original_event_time, logout);
        assert_eq!(adjustment.adjusted_boundary_time, boundary);
        assert_eq!(adjustment.spillover_check_in_time, logout);
        assert_eq!(record.cross_day_adjustment, Some(adjustment));
    }

    #[test]
    fn test_close_recomputes_hours_to_the_boundary() {
        let mut record = open_record_checked_in_at("22:00:00");

        close_at_day_boundary(&mut record, make_datetime("2026-03-03", "01:30:00")).unwrap();

        // 22:00:00.000 to 23:59:59.999 is a millisecond short of 2 hours
        assert!((record.total_work_hours - 2.0).abs() < 0.001);
        assert!(record.total_work_hours < 2.0);
    }

    #[test]
    fn test_close_is_a_no_op_unless_checked_in() {
        let logout = make_datetime("2026-03-03", "01:30:00");

        let mut fresh = AttendanceRecord::new("worker_001", make_date("2026-03-02"));
        assert!(close_at_day_boundary(&mut fresh, logout).is_none());
        assert!(fresh.entries.is_empty());
        assert_eq!(fresh.status, SessionStatus::CheckedOut);

        let mut on_break = open_record_checked_in_at("22:00:00");
        on_break.status = SessionStatus::OnBreak;
        assert!(close_at_day_boundary(&mut on_break, logout).is_none());
        assert_eq!(on_break.entries.len(), 1);
        assert_eq!(on_break.status, SessionStatus::OnBreak);

        let mut closed = open_record_checked_in_at("22:00:00");
        closed.status = SessionStatus::AutoCheckout;
        assert!(close_at_day_boundary(&mut closed, logout).is_none());
    }

    #[test]
    fn test_spillover_only_before_cutover() {
        let policy = TrackingPolicy::default();

        let small_hours = make_datetime("2026-03-03", "01:30:00");
        assert_eq!(spillover_check_in(small_hours, &policy), Some(small_hours));

        let last_eligible = make_datetime("2026-03-03", "05:59:59");
        assert_eq!(
            spillover_check_in(last_eligible, &policy),
            Some(last_eligible)
        );

        assert_eq!(
            spillover_check_in(make_datetime("2026-03-03", "06:00:00"), &policy),
            None
        );
        assert_eq!(
            spillover_check_in(make_datetime("2026-03-03", "09:00:00"), &policy),
            None
        );
    }
}
