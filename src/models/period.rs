//! Date range and reporting period types.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive range of logical work-days for summary queries.
///
/// A range whose `end_date` precedes its `start_date` contains no days;
/// summaries over it are empty rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range from two inclusive endpoints.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        DateRange {
            start_date,
            end_date,
        }
    }

    /// Checks if a day falls within the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start_date && day <= self.end_date
    }

    /// Returns the calendar week (Monday through Sunday) containing the
    /// reference date.
    pub fn week_of(reference: NaiveDate) -> Self {
        let week = reference.week(Weekday::Mon);
        DateRange {
            start_date: week.first_day(),
            end_date: week.last_day(),
        }
    }

    /// Returns the calendar month containing the reference date.
    pub fn month_of(reference: NaiveDate) -> Self {
        let start_date = reference
            .with_day(1)
            .expect("day one is valid in every month");
        let end_date = start_date
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .expect("date within supported range");
        DateRange {
            start_date,
            end_date,
        }
    }
}

/// A calendar period the reporting surface can ask a summary for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    /// The calendar week (Monday through Sunday) around a reference date.
    Week,
    /// The calendar month around a reference date.
    Month,
}

impl ReportPeriod {
    /// Returns the snake_case name of the period.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
        }
    }

    /// Resolves the period to the concrete date range around a
    /// reference date.
    pub fn resolve(&self, reference: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::Week => DateRange::week_of(reference),
            ReportPeriod::Month => DateRange::month_of(reference),
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
