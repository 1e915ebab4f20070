//! Configuration loading and management for the attendance engine.
//!
//! This module provides the tracking policy (day cutover hour,
//! end-of-day hour, persistence retry budget) and its YAML loader. The
//! defaults match the constants the engine's hour history was built
//! on.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::TrackingPolicy;
//!
//! let policy = TrackingPolicy::from_file("./config/policy.yaml").unwrap();
//! println!("Day cutover hour: {}", policy.day_cutover_hour);
//! ```

mod loader;
mod types;

pub use types::TrackingPolicy;
