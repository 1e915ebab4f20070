//! Attendance service layer.
//!
//! Wires the pure tracking functions to storage and notification ports
//! and enforces the one-writer-per-(worker, day) discipline. The
//! [`AttendanceService`] façade is the only entry point that persists
//! records; reads never write.

mod attendance;
mod locks;
mod notifier;
mod store;

pub use attendance::AttendanceService;
pub use notifier::{AttendanceNotifier, NoopNotifier};
pub use store::{AttendanceStore, InMemoryAttendanceStore, StoreError, StoredRecord};
