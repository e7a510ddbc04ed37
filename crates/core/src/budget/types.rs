//! Budget data types.

use chrono::{Datelike, NaiveDate};
use ledgerly_shared::types::{BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::billing::cycle::next_month;

/// A planned spending amount for one category in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Category the budget caps.
    pub category_id: CategoryId,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Planned amount.
    pub amount: Decimal,
}

impl Budget {
    /// Returns the half-open period this budget covers.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidPeriod` if the stored month/year is not a
    /// valid calendar month.
    pub fn period(&self) -> Result<BudgetPeriod, BudgetError> {
        BudgetPeriod::for_month(self.year, self.month)
    }
}

/// Half-open date range `[start, end)` covering one calendar month.
///
/// Unlike statement periods, the end bound is the first day of the next
/// month and is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    /// First day of the month, included.
    pub start: NaiveDate,
    /// First day of the following month, excluded.
    pub end: NaiveDate,
}

impl BudgetPeriod {
    /// Builds the period for a calendar month.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidPeriod` if `month` is not in 1-12 or the
    /// dates are out of range.
    pub fn for_month(year: i32, month: u32) -> Result<Self, BudgetError> {
        let invalid = || BudgetError::InvalidPeriod { month, year };

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next) = next_month(year, month);
        let end = NaiveDate::from_ymd_opt(next_year, next, 1).ok_or_else(invalid)?;

        Ok(Self { start, end })
    }

    /// Returns the period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::for_month(date.year(), date.month()).ok()
    }

    /// Returns true if `date` is on or after `start` and before `end`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// A budget together with the spending derived from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedBudget {
    /// The stored budget.
    #[serde(flatten)]
    pub budget: Budget,
    /// Sum of expenses in the budget's category and month.
    pub spent_amount: Decimal,
    /// Planned amount minus spent amount; negative when overspent.
    pub balance: Decimal,
}

impl EnrichedBudget {
    /// Returns true if spending exceeds the planned amount.
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.balance < Decimal::ZERO
    }
}
