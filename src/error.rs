//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror`
//! crate for all error conditions that can occur during attendance
//! tracking. No error here is fatal to a host process: validation and
//! policy errors are caller-correctable, and write conflicts are
//! transient.

use chrono::NaiveDate;
use thiserror::Error;

use crate::service::StoreError;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::AttendanceError;
///
/// let error = AttendanceError::InvalidEntryKind {
///     kind: "lunch".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid entry kind: lunch");
/// ```
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// A manual entry named a kind outside the four supported kinds.
    ///
    /// Rejected before any state mutation; nothing is written.
    #[error("Invalid entry kind: {kind}")]
    InvalidEntryKind {
        /// The kind string that failed to parse.
        kind: String,
    },

    /// Policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    PolicyNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    PolicyParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy value was out of range or inconsistent.
    #[error("Invalid policy value for '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Concurrent writers kept conflicting past the retry budget.
    ///
    /// Transient: the record on storage is consistent, this mutation
    /// just never landed. Callers may retry the whole operation.
    #[error("Write conflict for worker '{worker_id}' on {day} after {attempts} attempts")]
    WriteConflict {
        /// The worker whose record was contended.
        worker_id: String,
        /// The logical work-day of the contended record.
        day: NaiveDate,
        /// How many save attempts were made.
        attempts: u32,
    },

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// A type alias for Results that return AttendanceError.
pub type AttendanceResult<T> = Result<T, AttendanceError>;
