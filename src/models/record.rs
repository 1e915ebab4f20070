//! Attendance record model and related types.
//!
//! This module defines the AttendanceRecord aggregate that collects a
//! worker's time entries for one logical work-day, together with the
//! SessionStatus machine states and the cross-day adjustment marker.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{EntryKind, TimeEntry};

/// The state of a worker's session within one logical work-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Not currently working. Initial state, and terminal once the day
    /// is completed.
    #[default]
    CheckedOut,
    /// Currently working.
    CheckedIn,
    /// Currently on a break.
    OnBreak,
    /// Closed by the engine at the day boundary rather than by the
    /// worker. Terminal.
    AutoCheckout,
}

impl SessionStatus {
    /// Returns the snake_case name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::CheckedOut => "checked_out",
            SessionStatus::CheckedIn => "checked_in",
            SessionStatus::OnBreak => "on_break",
            SessionStatus::AutoCheckout => "auto_checkout",
        }
    }

    /// Returns true while the worker has an unclosed session (checked in
    /// or on a break).
    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::CheckedIn | SessionStatus::OnBreak)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a cross-day logout was resolved.
///
/// Recorded on the previous day's record when the engine closes it at
/// the day boundary in response to a logout on the following calendar
/// date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossDayAdjustment {
    /// The logout timestamp that triggered the close.
    pub original_event_time: NaiveDateTime,
    /// The synthetic check-out timestamp used to close the day
    /// (23:59:59.999 on the record's day).
    pub adjusted_boundary_time: NaiveDateTime,
    /// The timestamp given to the spillover check-in on the new day.
    pub spillover_check_in_time: NaiveDateTime,
}

/// A worker's attendance for one logical work-day.
///
/// Identified by the (worker_id, day) pair; exactly one record may exist
/// per pair. The entry log is append-only and the hour totals are
/// derived from it, never written directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The worker this record belongs to.
    pub worker_id: String,
    /// The logical work-day this record covers.
    pub day: NaiveDate,
    /// Every entry appended for this day, in append order. Manual
    /// corrections may backdate, so the log is not necessarily sorted
    /// by timestamp.
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
    /// Timestamp of the first check-in, set once and never overwritten.
    pub first_check_in: Option<NaiveDateTime>,
    /// Timestamp of the most recent check-out.
    pub last_check_out: Option<NaiveDateTime>,
    /// Derived work hours; written only by the hours calculator.
    pub total_work_hours: f64,
    /// Derived break hours; written only by the hours calculator.
    pub total_break_hours: f64,
    /// Current session state.
    pub status: SessionStatus,
    /// True once the day has been closed by an end-of-day check-out.
    pub is_completed: bool,
    /// Present when a cross-day logout closed this record at the day
    /// boundary.
    pub cross_day_adjustment: Option<CrossDayAdjustment>,
}

impl AttendanceRecord {
    /// Creates the zeroed record a (worker, day) pair starts from.
    pub fn new(worker_id: impl Into<String>, day: NaiveDate) -> Self {
        AttendanceRecord {
            worker_id: worker_id.into(),
            day,
            entries: Vec::new(),
            first_check_in: None,
            last_check_out: None,
            total_work_hours: 0.0,
            total_break_hours: 0.0,
            status: SessionStatus::CheckedOut,
            is_completed: false,
            cross_day_adjustment: None,
        }
    }

    /// Returns the most recently appended entry, if any.
    pub fn last_entry(&self) -> Option<&TimeEntry> {
        self.entries.last()
    }

    /// Returns true while the record holds an unclosed session.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Counts the entries of one kind, regardless of source.
    pub fn count_of(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
