//! Work and break hour derivation.
//!
//! Totals are always recomputed from the full entry log rather than
//! updated incrementally, because backdated manual corrections can
//! change earlier intervals. Unmatched markers follow a lenient policy:
//! a repeated check-in overwrites the open one, and a closing entry
//! with nothing open is ignored.

use chrono::NaiveDateTime;

use crate::models::{AttendanceRecord, EntryKind, TimeEntry};

/// Work and break totals derived from an entry log, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HourTotals {
    /// Hours spent working.
    pub work_hours: f64,
    /// Hours spent on breaks.
    pub break_hours: f64,
}

/// Derives work and break totals from entries in stored order.
///
/// The walk keeps two open markers. A `check_in` opens the work clock
/// (overwriting any unclosed one); a `check_out` closes it into the work
/// total. A `break_start` pauses the work clock, closing the running work
/// segment, and opens the break clock; a `break_end` closes the break
/// into the break total and resumes the work clock at its own timestamp.
/// A `break_end` with no open break is ignored entirely. A `check_in`
/// during an open break leaves the break marker untouched, so work and
/// break intervals can overlap in wall-clock time.
///
/// Trailing open markers contribute nothing: a still-open session is
/// not counted until closed. Use [`live_totals`] for a provisional
/// figure that treats "now" as the close.
///
/// # Arguments
///
/// * `entries` - The entry log, in append order
///
/// # Returns
///
/// The derived totals. With entries whose closes follow their opens
/// chronologically, both totals are non-negative.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::{EntryKind, EntrySource, TimeEntry};
/// use attendance_engine::tracking::calculate_totals;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let entries = vec![
///     TimeEntry::new(EntryKind::CheckIn, at("2026-03-02 09:00:00"), EntrySource::Login),
///     TimeEntry::new(EntryKind::BreakStart, at("2026-03-02 13:00:00"), EntrySource::Logout),
///     TimeEntry::new(EntryKind::BreakEnd, at("2026-03-02 14:00:00"), EntrySource::Login),
///     TimeEntry::new(EntryKind::CheckOut, at("2026-03-02 18:00:00"), EntrySource::Logout),
/// ];
///
/// let totals = calculate_totals(&entries);
/// assert_eq!(totals.work_hours, 8.0);
/// assert_eq!(totals.break_hours, 1.0);
/// ```
pub fn calculate_totals(entries: &[TimeEntry]) -> HourTotals {
    let (totals, _, _) = walk_entries(entries);
    totals
}

/// Recomputes and stores a record's totals from its entry log.
///
/// Must run after every mutation of the log; nothing else may write the
/// total fields.
pub fn recompute(record: &mut AttendanceRecord) {
    let totals = calculate_totals(&record.entries);
    record.total_work_hours = totals.work_hours;
    record.total_break_hours = totals.break_hours;
}

/// Derives provisional totals, closing any trailing open markers at `now`.
///
/// Stored totals deliberately exclude open sessions; a dashboard showing
/// the current day uses this instead, passing its own clock. The record
/// is not modified and `now` is taken as given, even if it precedes an
/// open marker.
pub fn live_totals(record: &AttendanceRecord, now: NaiveDateTime) -> HourTotals {
    let (mut totals, open_check_in, open_break_start) = walk_entries(&record.entries);
    if let Some(started) = open_check_in {
        totals.work_hours += hours_between(started, now);
    }
    if let Some(started) = open_break_start {
        totals.break_hours += hours_between(started, now);
    }
    totals
}

fn walk_entries(
    entries: &[TimeEntry],
) -> (HourTotals, Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let mut totals = HourTotals::default();
    let mut open_check_in: Option<NaiveDateTime> = None;
    let mut open_break_start: Option<NaiveDateTime> = None;

    for entry in entries {
        match entry.kind {
            EntryKind::CheckIn => {
                open_check_in = Some(entry.timestamp);
            }
            EntryKind::CheckOut => {
                if let Some(started) = open_check_in.take() {
                    totals.work_hours += hours_between(started, entry.timestamp);
                }
            }
            EntryKind::BreakStart => {
                if let Some(started) = open_check_in.take() {
                    totals.work_hours += hours_between(started, entry.timestamp);
                }
                open_break_start = Some(entry.timestamp);
            }
            EntryKind::BreakEnd => {
                if let Some(started) = open_break_start.take() {
                    totals.break_hours += hours_between(started, entry.timestamp);
                    open_check_in = Some(entry.timestamp);
                }
            }
        }
    }

    (totals, open_check_in, open_break_start)
}

fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}
