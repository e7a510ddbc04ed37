//! The read interface the engine requires from the ledger store.
//!
//! Implementations live outside this crate (PostgreSQL in `ledgerly-db`)
//! except for [`super::InMemoryLedgerStore`]. Every method is scoped to a
//! user; a row owned by someone else is indistinguishable from a missing one.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Account, Transaction};
use crate::budget::{Budget, BudgetPeriod};

/// Errors raised by a ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The query did not complete before the engine's deadline.
    #[error("Ledger store query timed out after {0:?}")]
    Timeout(Duration),

    /// The backend could not be reached or rejected the query.
    #[error("Ledger store unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a row the engine cannot interpret.
    #[error("Ledger store returned invalid data: {0}")]
    InvalidData(String),
}

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns true if `date` falls within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Filter for [`LedgerStore::fetch_transactions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only rows where this account is the source or the destination.
    pub account_id: Option<AccountId>,
    /// Only rows dated within this inclusive range.
    pub date_range: Option<DateRange>,
}

impl TransactionFilter {
    /// Filter for every transaction touching `account_id`.
    #[must_use]
    pub const fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            date_range: None,
        }
    }

    /// Restricts the filter to an inclusive date range.
    #[must_use]
    pub const fn within(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Returns true if `transaction` passes the filter.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.account_id.is_none_or(|id| transaction.touches(id))
            && self.date_range.is_none_or(|range| range.contains(transaction.date))
    }
}

/// Filter for [`LedgerStore::list_budgets`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BudgetFilter {
    /// Calendar month, 1-12.
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
}

impl BudgetFilter {
    /// Returns true if `budget` passes the filter.
    #[must_use]
    pub fn matches(&self, budget: &Budget) -> bool {
        self.month.is_none_or(|m| budget.month == m) && self.year.is_none_or(|y| budget.year == y)
    }
}

/// Read-only access to accounts, transactions and budgets.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetches one account, or `None` if the user has no such account.
    async fn fetch_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<Account>, StoreError>;

    /// Lists every account owned by the user.
    async fn list_accounts(&self, user_id: UserId) -> Result<Vec<Account>, StoreError>;

    /// Fetches the user's transactions matching `filter`, ordered by date.
    async fn fetch_transactions(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Sums the user's `expense` transactions in `category_id` dated within
    /// the half-open `period`. Returns zero when there are none.
    async fn sum_expenses(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> Result<Decimal, StoreError>;

    /// Fetches one budget, or `None` if the user has no such budget.
    async fn fetch_budget(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
    ) -> Result<Option<Budget>, StoreError>;

    /// Lists the user's budgets matching `filter`.
    async fn list_budgets(
        &self,
        user_id: UserId,
        filter: BudgetFilter,
    ) -> Result<Vec<Budget>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let range = DateRange {
            start: date(2025, 3, 31),
            end: date(2025, 4, 30),
        };

        assert!(range.contains(date(2025, 3, 31)));
        assert!(range.contains(date(2025, 4, 30)));
        assert!(!range.contains(date(2025, 3, 30)));
        assert!(!range.contains(date(2025, 5, 1)));
    }

    #[test]
    fn test_budget_filter_matches() {
        let filter = BudgetFilter {
            month: Some(6),
            year: None,
        };
        let budget = Budget {
            id: BudgetId::new(),
            user_id: UserId::new(),
            category_id: CategoryId::new(),
            month: 6,
            year: 2024,
            amount: Decimal::ONE,
        };

        assert!(filter.matches(&budget));
        assert!(!BudgetFilter { month: Some(7), year: None }.matches(&budget));
        assert!(BudgetFilter::default().matches(&budget));
    }
}
