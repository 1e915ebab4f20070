//! Tracking logic for the attendance engine.
//!
//! This module contains the pure functions that derive attendance from
//! entry logs: logical work-day resolution with the early-morning
//! cutover, work and break hour calculation, login/logout
//! classification with session status transitions, and the cross-day
//! logout close. Everything here operates on plain values; persistence
//! and locking live in the service layer.

mod cross_day;
mod day_resolver;
mod hours;
mod state_machine;

pub use cross_day::{close_at_day_boundary, spillover_check_in};
pub use day_resolver::{resolve_work_day, work_day_close};
pub use hours::{HourTotals, calculate_totals, live_totals, recompute};
pub use state_machine::{
    Classification, apply_classified, apply_manual, classify_login, classify_logout,
};
