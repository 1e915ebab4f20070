//! Policy loading functionality.
//!
//! This module provides loading of the [`TrackingPolicy`] from a YAML
//! file.

use std::fs;
use std::path::Path;

use crate::error::{AttendanceError, AttendanceResult};

use super::types::TrackingPolicy;

impl TrackingPolicy {
    /// Loads and validates a tracking policy from a YAML file.
    ///
    /// Missing keys fall back to the defaults, so a file overriding a
    /// single threshold is fine.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the policy file (e.g., "./config/policy.yaml")
    ///
    /// # Returns
    ///
    /// Returns the policy on success, or an error if the file is
    /// missing, contains invalid YAML, or fails validation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::TrackingPolicy;
    ///
    /// let policy = TrackingPolicy::from_file("./config/policy.yaml").unwrap();
    /// assert!(policy.validate().is_ok());
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> AttendanceResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AttendanceError::PolicyNotFound {
            path: path_str.clone(),
        })?;

        let policy: TrackingPolicy =
            serde_yaml::from_str(&content).map_err(|e| AttendanceError::PolicyParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        policy.validate()?;
        Ok(policy)
    }
}
