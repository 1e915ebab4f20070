//! Daily Attendance Tracking Engine
//!
//! This crate derives daily attendance records (check-in, breaks, check-out,
//! worked and break hours) from timestamped login, logout, and manual entry
//! events, with work days that roll over at a configurable early-morning hour.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tracking;
