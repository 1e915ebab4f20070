//! Time entry model and related types.
//!
//! This module defines the TimeEntry struct and the EntryKind and
//! EntrySource enums that make up a record's append-only event log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The kind of event a time entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// The worker started working for the day or resumed after checkout.
    CheckIn,
    /// The worker stopped working.
    CheckOut,
    /// The worker stepped away without ending the day.
    BreakStart,
    /// The worker returned from a break.
    BreakEnd,
}

impl EntryKind {
    /// Returns the snake_case name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::CheckIn => "check_in",
            EntryKind::CheckOut => "check_out",
            EntryKind::BreakStart => "break_start",
            EntryKind::BreakEnd => "break_end",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(EntryKind::CheckIn),
            "check_out" => Ok(EntryKind::CheckOut),
            "break_start" => Ok(EntryKind::BreakStart),
            "break_end" => Ok(EntryKind::BreakEnd),
            _ => Err(format!("invalid entry kind: {s}")),
        }
    }
}

/// Where a time entry came from.
///
/// Provenance is carried for audit purposes only and never affects
/// hour calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Entered through the manual-correction surface.
    Manual,
    /// Derived from an authentication login event.
    Login,
    /// Derived from an authentication logout event.
    Logout,
    /// Synthesized by the engine itself (day-boundary close, spillover).
    Auto,
}

impl EntrySource {
    /// Returns the snake_case name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Manual => "manual",
            EntrySource::Login => "login",
            EntrySource::Logout => "logout",
            EntrySource::Auto => "auto",
        }
    }
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single event in an attendance record's log.
///
/// Entries are immutable once appended; corrections add new entries
/// rather than mutating old ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The kind of event.
    pub kind: EntryKind,
    /// When the event occurred (local wall clock).
    pub timestamp: NaiveDateTime,
    /// Where the event came from.
    pub source: EntrySource,
    /// Optional free-text annotation.
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeEntry {
    /// Creates an entry without a note.
    pub fn new(kind: EntryKind, timestamp: NaiveDateTime, source: EntrySource) -> Self {
        TimeEntry {
            kind,
            timestamp,
            source,
            note: None,
        }
    }

    /// Creates an entry carrying a note.
    pub fn with_note(
        kind: EntryKind,
        timestamp: NaiveDateTime,
        source: EntrySource,
        note: Option<String>,
    ) -> Self {
        TimeEntry {
            kind,
            timestamp,
            source,
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_entry_kind_round_trip_names() {
        let kinds = [
            EntryKind::CheckIn,
            EntryKind::CheckOut,
            EntryKind::BreakStart,
            EntryKind::BreakEnd,
        ];
        for kind in kinds {
            let parsed: EntryKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_entry_kind_rejects_unknown_names() {
        assert!("checkin".parse::<EntryKind>().is_err());
        assert!("CHECK_IN".parse::<EntryKind>().is_err());
        assert!("".parse::<EntryKind>().is_err());

        let err = "lunch".parse::<EntryKind>().unwrap_err();
        assert!(err.contains("lunch"));
    }

    #[test]
    fn test_entry_kind_serde_uses_snake_case() {
        let json = serde_json::to_string(&EntryKind::BreakStart).unwrap();
        assert_eq!(json, "\"break_start\"");

        let kind: EntryKind = serde_json::from_str("\"check_out\"").unwrap();
        assert_eq!(kind, EntryKind::CheckOut);
    }

    #[test]
    fn test_entry_source_display() {
        assert_eq!(EntrySource::Manual.to_string(), "manual");
        assert_eq!(EntrySource::Auto.to_string(), "auto");
    }

    #[test]
    fn test_time_entry_deserialization() {
        let json = r#"{
            "kind": "check_in",
            "timestamp": "2026-03-02T09:00:00",
            "source": "login"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::CheckIn);
        assert_eq!(entry.timestamp, make_datetime("2026-03-02", "09:00:00"));
        assert_eq!(entry.source, EntrySource::Login);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_time_entry_with_note() {
        let entry = TimeEntry::with_note(
            EntryKind::CheckOut,
            make_datetime("2026-03-02", "17:30:00"),
            EntrySource::Manual,
            Some("forgot to log out".to_string()),
        );

        assert_eq!(entry.note.as_deref(), Some("forgot to log out"));

        let json = serde_json::to_string(&entry).unwrap();
        let back: TimeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
