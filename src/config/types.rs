//! Configuration types for attendance tracking.
//!
//! This module contains the strongly-typed policy structure that is
//! deserialized from YAML configuration files.

use serde::Deserialize;

use crate::error::{AttendanceError, AttendanceResult};

/// Policy knobs governing day attribution and logout classification.
///
/// The defaults are the thresholds the hour history was built on:
/// changing them on an existing data set silently changes what past
/// events would have meant, so treat overrides as a new deployment
/// decision, not a tuning parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingPolicy {
    /// Hour of day (0-23) before which an event belongs to the
    /// previous logical work-day.
    pub day_cutover_hour: u32,
    /// Hour of day (0-23) from which a logout counts as end-of-day
    /// rather than a break.
    pub end_of_day_hour: u32,
    /// Total save attempts per mutation before a conflicting persist
    /// gives up.
    pub persist_retry_limit: u32,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        TrackingPolicy {
            day_cutover_hour: 6,
            end_of_day_hour: 17,
            persist_retry_limit: 3,
        }
    }
}

impl TrackingPolicy {
    /// Checks the policy values for internal consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` for a usable policy, or an error naming the offending
    /// field when an hour is out of range, the cutover does not precede
    /// the end-of-day hour, or the retry budget is zero.
    pub fn validate(&self) -> AttendanceResult<()> {
        if self.day_cutover_hour >= 24 {
            return Err(AttendanceError::InvalidPolicy {
                field: "day_cutover_hour".to_string(),
                message: format!("must be an hour between 0 and 23, got {}", self.day_cutover_hour),
            });
        }
        if self.end_of_day_hour >= 24 {
            return Err(AttendanceError::InvalidPolicy {
                field: "end_of_day_hour".to_string(),
                message: format!("must be an hour between 0 and 23, got {}", self.end_of_day_hour),
            });
        }
        if self.day_cutover_hour >= self.end_of_day_hour {
            return Err(AttendanceError::InvalidPolicy {
                field: "end_of_day_hour".to_string(),
                message: format!(
                    "must be later than day_cutover_hour ({} >= {})",
                    self.day_cutover_hour, self.end_of_day_hour
                ),
            });
        }
        if self.persist_retry_limit == 0 {
            return Err(AttendanceError::InvalidPolicy {
                field: "persist_retry_limit".to_string(),
                message: "at least one save attempt is required".to_string(),
            });
        }
        Ok(())
    }
}
