//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod entry;
mod period;
mod record;
mod summary;

pub use entry::{EntryKind, EntrySource, TimeEntry};
pub use period::{DateRange, ReportPeriod};
pub use record::{AttendanceRecord, CrossDayAdjustment, SessionStatus};
pub use summary::{AttendanceSummary, DayBreakdown};
