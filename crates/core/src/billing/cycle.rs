//! Billing cycle calendar math.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::BillingError;
use crate::ledger::DateRange;

/// Inclusive statement period `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    /// Previous month's closing date.
    pub start: NaiveDate,
    /// This month's closing date.
    pub end: NaiveDate,
}

impl StatementPeriod {
    /// Returns true if `date` falls within the period, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl From<StatementPeriod> for DateRange {
    fn from(period: StatementPeriod) -> Self {
        Self {
            start: period.start,
            end: period.end,
        }
    }
}

fn check_day(day: u32) -> Result<u32, BillingError> {
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(BillingError::InvalidDay(day))
    }
}

fn check_month(month: u32) -> Result<u32, BillingError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(BillingError::InvalidMonth(month))
    }
}

/// Returns the month before `(year, month)`, rolling back over January.
#[must_use]
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year.saturating_sub(1), 12)
    } else {
        (year, month - 1)
    }
}

/// Returns the month after `(year, month)`, rolling over December.
#[must_use]
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    }
}

/// Returns the last day of a calendar month.
///
/// # Errors
///
/// Returns an error if `month` is not in 1-12 or the year is out of range.
pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, BillingError> {
    check_month(month)?;
    let (next_year, next) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or(BillingError::InvalidDate { year, month })
}

/// Returns `day` in the given month, clamped to the month's last day.
fn clamped_day(day: u32, year: i32, month: u32) -> Result<NaiveDate, BillingError> {
    let day = check_day(day)?;
    let last = last_day_of_month(year, month)?;
    last.with_day(day.min(last.day()))
        .ok_or(BillingError::InvalidDate { year, month })
}

/// Computes the statement period closing in `(year, month)`.
///
/// The period ends on the closing day of the target month and starts on the
/// closing day of the previous month, each clamped to its month's end.
///
/// # Errors
///
/// Returns an error if `closing_day` is not in 1-31, `month` is not in 1-12,
/// or the dates cannot be represented.
pub fn statement_period(
    closing_day: u32,
    year: i32,
    month: u32,
) -> Result<StatementPeriod, BillingError> {
    let end = clamped_day(closing_day, year, month)?;

    let (prev_year, prev) = previous_month(year, month);
    let start = clamped_day(closing_day, prev_year, prev)?;

    Ok(StatementPeriod { start, end })
}

/// Computes the payment due date in `(year, month)`, clamped to month end.
///
/// # Errors
///
/// Returns an error if `due_day` is not in 1-31, `month` is not in 1-12, or
/// the date cannot be represented.
pub fn due_date(due_day: u32, year: i32, month: u32) -> Result<NaiveDate, BillingError> {
    clamped_day(due_day, year, month)
}
