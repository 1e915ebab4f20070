//! Session status transitions and event classification.
//!
//! Login and logout events carry no entry kind of their own; they are
//! classified against the record's current status and the time of day
//! before being applied. Manual entries skip classification and force
//! the status matching their kind.

use chrono::{NaiveDateTime, Timelike};

use crate::config::TrackingPolicy;
use crate::models::{AttendanceRecord, EntryKind, SessionStatus, TimeEntry};

/// The entry kind assigned to a login or logout event, plus whether a
/// check-out counts as the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The entry kind the event maps to.
    pub kind: EntryKind,
    /// True when a check-out closes the day rather than pausing it.
    pub end_of_day: bool,
}

/// Classifies a login event against the record's current status.
///
/// A login while a session is open (checked in or on a break) means the
/// worker is re-entering after an implicit break, so it becomes a
/// `break_end`. Otherwise it is a plain `check_in`.
pub fn classify_login(status: SessionStatus) -> Classification {
    if status.is_open() {
        Classification {
            kind: EntryKind::BreakEnd,
            end_of_day: false,
        }
    } else {
        Classification {
            kind: EntryKind::CheckIn,
            end_of_day: false,
        }
    }
}

/// Classifies a logout event by time of day.
///
/// The engine cannot distinguish "going home" from "stepping out"
/// except by the clock: a logout at or after the end-of-day hour, or in
/// the small hours before the cutover, is an end-of-day `check_out`;
/// anything else is a `break_start`. The thresholds are policy, not a
/// guess; changing them would silently alter historical hours.
pub fn classify_logout(timestamp: NaiveDateTime, policy: &TrackingPolicy) -> Classification {
    let hour = timestamp.hour();
    if hour >= policy.end_of_day_hour || hour < policy.day_cutover_hour {
        Classification {
            kind: EntryKind::CheckOut,
            end_of_day: true,
        }
    } else {
        Classification {
            kind: EntryKind::BreakStart,
            end_of_day: false,
        }
    }
}

/// Appends a classified entry and advances the session status.
///
/// Transitions:
///
/// | Current | Entry | Next |
/// |---|---|---|
/// | checked_out | check_in | checked_in |
/// | checked_in | break_start | on_break |
/// | checked_in | check_out | checked_out (completed when end-of-day) |
/// | on_break | break_end | checked_in |
/// | on_break | check_out | checked_out, completed |
///
/// Any other (status, kind) pair is accepted into the log but leaves
/// the status unchanged. Marker fields follow the entry kind: the first
/// `check_in` sets `first_check_in` once, every `check_out` overwrites
/// `last_check_out`.
pub fn apply_classified(record: &mut AttendanceRecord, entry: TimeEntry, end_of_day: bool) {
    apply_markers(record, &entry);

    record.status = match (record.status, entry.kind) {
        (SessionStatus::CheckedOut, EntryKind::CheckIn) => SessionStatus::CheckedIn,
        (SessionStatus::CheckedIn, EntryKind::BreakStart) => SessionStatus::OnBreak,
        (SessionStatus::CheckedIn, EntryKind::CheckOut) => {
            if end_of_day {
                record.is_completed = true;
            }
            SessionStatus::CheckedOut
        }
        (SessionStatus::OnBreak, EntryKind::BreakEnd) => SessionStatus::CheckedIn,
        (SessionStatus::OnBreak, EntryKind::CheckOut) => {
            // A check-out from a break always closes the day
            record.is_completed = true;
            SessionStatus::CheckedOut
        }
        (current, _) => current,
    };

    record.entries.push(entry);
}

/// Appends a manual entry, forcing the status that matches its kind.
///
/// Manual entries are explicit and authoritative: they bypass the
/// transition table, and a manual `check_out` closes the day.
pub fn apply_manual(record: &mut AttendanceRecord, entry: TimeEntry) {
    apply_markers(record, &entry);

    record.status = match entry.kind {
        EntryKind::CheckIn => SessionStatus::CheckedIn,
        EntryKind::CheckOut => {
            record.is_completed = true;
            SessionStatus::CheckedOut
        }
        EntryKind::BreakStart => SessionStatus::OnBreak,
        EntryKind::BreakEnd => SessionStatus::CheckedIn,
    };

    record.entries.push(entry);
}

fn apply_markers(record: &mut AttendanceRecord, entry: &TimeEntry) {
    match entry.kind {
        EntryKind::CheckIn => {
            if record.first_check_in.is_none() {
                record.first_check_in = Some(entry.timestamp);
            }
        }
        EntryKind::CheckOut => {
            record.last_check_out = Some(entry.timestamp);
        }
        EntryKind::BreakStart | EntryKind::BreakEnd => {}
    }
}
