//! Reporting periods
//!
//! Budgets are entered per month. A reporting period picks the window of
//! transactions to count (week, month or semester) and the multiplier used to
//! scale the monthly budget onto that window.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The window over which spend aggregates are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportingPeriod {
    /// Sunday through Saturday
    Week,
    /// Calendar month
    #[default]
    Month,
    /// Four-month block starting in January, May or September
    Semester,
}

/// A resolved period: where it starts, where it ends and how much is left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    /// First day counted (inclusive)
    pub start: NaiveDate,
    /// First day after the window (exclusive)
    pub end: NaiveDate,
    /// Days left in the window as seen from the reference date
    pub days_remaining: i64,
}

impl PeriodWindow {
    /// Whether a date falls on or after the window start
    ///
    /// Spend is counted from the start onwards; there is no upper bound.
    pub fn includes(&self, date: NaiveDate) -> bool {
        date >= self.start
    }
}

impl ReportingPeriod {
    /// All periods in selector order
    pub fn all() -> &'static [Self] {
        &[Self::Week, Self::Month, Self::Semester]
    }

    /// Multiplier applied to a monthly budget, as `(numerator, denominator)`
    pub fn multiplier(&self) -> (i64, i64) {
        match self {
            Self::Week => (1, 4),
            Self::Month => (1, 1),
            Self::Semester => (4, 1),
        }
    }

    /// Resolve the window containing `today`
    pub fn window(&self, today: NaiveDate) -> PeriodWindow {
        match self {
            Self::Week => {
                let day_of_week = today.weekday().num_days_from_sunday() as i64;
                let start = today - Duration::days(day_of_week);
                PeriodWindow {
                    start,
                    end: start + Duration::days(7),
                    days_remaining: 7 - day_of_week,
                }
            }
            Self::Month => {
                let start = first_of_month(today.year(), today.month());
                let end = first_of_next_month(today.year(), today.month());
                let last_day = (end - Duration::days(1)).day() as i64;
                PeriodWindow {
                    start,
                    end,
                    days_remaining: last_day - today.day() as i64,
                }
            }
            Self::Semester => {
                let block_start_month = (today.month0() / 4) * 4 + 1;
                let start = first_of_month(today.year(), block_start_month);
                let end = if block_start_month + 4 > 12 {
                    first_of_month(today.year() + 1, 1)
                } else {
                    first_of_month(today.year(), block_start_month + 4)
                };
                PeriodWindow {
                    start,
                    end,
                    days_remaining: (end - today).num_days(),
                }
            }
        }
    }

    /// Parse a period name (`week`, `month`, `semester`, case-insensitive)
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(Self::Week),
            "month" | "monthly" | "m" => Ok(Self::Month),
            "semester" | "s" => Ok(Self::Semester),
            other => Err(PeriodParseError::Unknown(other.to_string())),
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Semester => write!(f, "semester"),
        }
    }
}

impl std::str::FromStr for ReportingPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    Unknown(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::Unknown(s) => {
                write!(f, "Unknown period '{}' (expected week, month or semester)", s)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
