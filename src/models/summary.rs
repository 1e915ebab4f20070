//! Summary read models for reporting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, SessionStatus};

/// One day's contribution to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// The logical work-day.
    pub day: NaiveDate,
    /// Work hours stored on that day's record.
    pub work_hours: f64,
    /// Break hours stored on that day's record.
    pub break_hours: f64,
    /// The record's session state.
    pub status: SessionStatus,
    /// Whether the day was closed by an end-of-day check-out.
    pub is_completed: bool,
}

/// Aggregated attendance over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Sum of work hours across the range.
    pub total_work_hours: f64,
    /// Sum of break hours across the range.
    pub total_break_hours: f64,
    /// Number of days whose record holds more than zero work hours.
    pub days_worked: u32,
    /// Work hours per worked day; zero when no day was worked.
    pub average_work_hours: f64,
    /// One row per day that has a record in the range, ordered by day.
    pub per_day: Vec<DayBreakdown>,
}

impl AttendanceSummary {
    /// Aggregates a set of records into a summary.
    ///
    /// Days with a record but no worked hours appear in the breakdown
    /// without counting toward `days_worked`. An empty record set yields
    /// an all-zero summary.
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut total_work_hours = 0.0;
        let mut total_break_hours = 0.0;
        let mut days_worked = 0u32;
        let mut per_day = Vec::with_capacity(records.len());

        for record in records {
            total_work_hours += record.total_work_hours;
            total_break_hours += record.total_break_hours;
            if record.total_work_hours > 0.0 {
                days_worked += 1;
            }
            per_day.push(DayBreakdown {
                day: record.day,
                work_hours: record.total_work_hours,
                break_hours: record.total_break_hours,
                status: record.status,
                is_completed: record.is_completed,
            });
        }
        per_day.sort_by_key(|breakdown| breakdown.day);

        let average_work_hours = if days_worked == 0 {
            0.0
        } else {
            total_work_hours / f64::from(days_worked)
        };

        AttendanceSummary {
            total_work_hours,
            total_break_hours,
            days_worked,
            average_work_hours,
            per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record_with_hours(day: &str, work: f64, brk: f64) -> AttendanceRecord {
        let mut record = AttendanceRecord::new("worker_001", make_date(day));
        record.total_work_hours = work;
        record.total_break_hours = brk;
        record
    }

    #[test]
    fn test_empty_range_yields_zero_summary() {
        let summary = AttendanceSummary::from_records(&[]);

        assert_eq!(summary.total_work_hours, 0.0);
        assert_eq!(summary.total_break_hours, 0.0);
        assert_eq!(summary.days_worked, 0);
        assert_eq!(summary.average_work_hours, 0.0);
        assert!(summary.per_day.is_empty());
    }

    #[test]
    fn test_zero_worked_days_average_is_zero() {
        // A record exists but holds no worked hours
        let records = vec![record_with_hours("2026-03-02", 0.0, 0.0)];
        let summary = AttendanceSummary::from_records(&records);

        assert_eq!(summary.days_worked, 0);
        assert_eq!(summary.average_work_hours, 0.0);
        assert_eq!(summary.per_day.len(), 1);
    }

    #[test]
    fn test_totals_and_average() {
        let records = vec![
            record_with_hours("2026-03-02", 8.0, 1.0),
            record_with_hours("2026-03-03", 7.5, 0.5),
            record_with_hours("2026-03-04", 0.0, 0.0),
        ];
        let summary = AttendanceSummary::from_records(&records);

        assert_eq!(summary.total_work_hours, 15.5);
        assert_eq!(summary.total_break_hours, 1.5);
        assert_eq!(summary.days_worked, 2);
        assert_eq!(summary.average_work_hours, 7.75);
        assert_eq!(summary.per_day.len(), 3);
    }

    #[test]
    fn test_breakdown_is_ordered_by_day() {
        let records = vec![
            record_with_hours("2026-03-04", 8.0, 0.0),
            record_with_hours("2026-03-02", 6.0, 0.0),
            record_with_hours("2026-03-03", 7.0, 0.0),
        ];
        let summary = AttendanceSummary::from_records(&records);

        let days: Vec<NaiveDate> = summary.per_day.iter().map(|b| b.day).collect();
        assert_eq!(
            days,
            vec![
                make_date("2026-03-02"),
                make_date("2026-03-03"),
                make_date("2026-03-04"),
            ]
        );
    }
}
