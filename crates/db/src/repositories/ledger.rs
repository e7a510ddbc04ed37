//! PostgreSQL-backed ledger store.
//!
//! Every query is scoped by `user_id`; rows owned by another user are never
//! returned.

use async_trait::async_trait;
use ledgerly_core::budget::{Budget, BudgetPeriod};
use ledgerly_core::ledger::{
    Account, BudgetFilter, LedgerStore, StoreError, Transaction, TransactionFilter,
};
use ledgerly_shared::types::{AccountId, BudgetId, CategoryId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::mapping::{account_from_model, budget_from_model, transaction_from_model};
use crate::entities::{accounts, budgets, sea_orm_active_enums, transactions};

/// Error types for ledger repository operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerRepositoryError {
    /// A row holds a value the domain model cannot represent.
    #[error("Invalid value in column {column}: {value}")]
    InvalidRow {
        /// Offending column.
        column: &'static str,
        /// The stored value.
        value: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerRepositoryError> for StoreError {
    fn from(err: LedgerRepositoryError) -> Self {
        match err {
            LedgerRepositoryError::InvalidRow { .. } => Self::InvalidData(err.to_string()),
            LedgerRepositoryError::Database(e) => Self::Unavailable(e.to_string()),
        }
    }
}

/// Ledger repository for read-side queries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets an account by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<Account>, LedgerRepositoryError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?
            .map(account_from_model)
            .transpose()
    }

    /// Lists a user's accounts ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_user_accounts(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Account>, LedgerRepositoryError> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(accounts::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(account_from_model)
            .collect()
    }

    /// Lists a user's transactions matching `filter`, ordered by date.
    ///
    /// The account filter matches the source or the destination column.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, LedgerRepositoryError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.into_inner()));

        if let Some(account_id) = filter.account_id {
            let id = account_id.into_inner();
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::AccountId.eq(id))
                    .add(transactions::Column::DestinationAccountId.eq(id)),
            );
        }

        if let Some(range) = filter.date_range {
            query = query
                .filter(transactions::Column::TransactionDate.gte(range.start))
                .filter(transactions::Column::TransactionDate.lte(range.end));
        }

        let rows = query
            .order_by_asc(transactions::Column::TransactionDate)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(transaction_from_model).collect())
    }

    /// Sums a user's expenses in one category over a half-open period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn sum_category_expenses(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> Result<Decimal, LedgerRepositoryError> {
        let total: Option<Option<Decimal>> = transactions::Entity::find()
            .select_only()
            .column_as(Expr::col(transactions::Column::Amount).sum(), "total")
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .filter(transactions::Column::CategoryId.eq(category_id.into_inner()))
            .filter(
                transactions::Column::TransactionType
                    .eq(sea_orm_active_enums::TransactionType::Expense),
            )
            .filter(transactions::Column::TransactionDate.gte(period.start))
            .filter(transactions::Column::TransactionDate.lt(period.end))
            .into_tuple()
            .one(&self.db)
            .await?;

        // SUM over no rows is NULL
        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Gets a budget by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_budget(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
    ) -> Result<Option<Budget>, LedgerRepositoryError> {
        budgets::Entity::find_by_id(budget_id.into_inner())
            .filter(budgets::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?
            .map(budget_from_model)
            .transpose()
    }

    /// Lists a user's budgets, optionally filtered by month and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_user_budgets(
        &self,
        user_id: UserId,
        filter: BudgetFilter,
    ) -> Result<Vec<Budget>, LedgerRepositoryError> {
        let mut query =
            budgets::Entity::find().filter(budgets::Column::UserId.eq(user_id.into_inner()));

        if let Some(month) = filter.month {
            let month = i16::try_from(month).map_err(|_| LedgerRepositoryError::InvalidRow {
                column: "month",
                value: month.to_string(),
            })?;
            query = query.filter(budgets::Column::Month.eq(month));
        }
        if let Some(year) = filter.year {
            query = query.filter(budgets::Column::Year.eq(year));
        }

        query
            .order_by_asc(budgets::Column::Year)
            .order_by_asc(budgets::Column::Month)
            .all(&self.db)
            .await?
            .into_iter()
            .map(budget_from_model)
            .collect()
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn fetch_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self.get_account(user_id, account_id).await?)
    }

    async fn list_accounts(&self, user_id: UserId) -> Result<Vec<Account>, StoreError> {
        Ok(self.list_user_accounts(user_id).await?)
    }

    async fn fetch_transactions(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.list_transactions(user_id, filter).await?)
    }

    async fn sum_expenses(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> Result<Decimal, StoreError> {
        Ok(self
            .sum_category_expenses(user_id, category_id, period)
            .await?)
    }

    async fn fetch_budget(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
    ) -> Result<Option<Budget>, StoreError> {
        Ok(self.get_budget(user_id, budget_id).await?)
    }

    async fn list_budgets(
        &self,
        user_id: UserId,
        filter: BudgetFilter,
    ) -> Result<Vec<Budget>, StoreError> {
        Ok(self.list_user_budgets(user_id, filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_maps_to_unavailable() {
        let err = StoreError::from(LedgerRepositoryError::Database(DbErr::Custom(
            "connection reset".to_string(),
        )));
        assert!(matches!(err, StoreError::Unavailable(msg) if msg.contains("connection reset")));
    }

    #[test]
    fn test_invalid_row_maps_to_invalid_data() {
        let err = StoreError::from(LedgerRepositoryError::InvalidRow {
            column: "month",
            value: "-3".to_string(),
        });
        assert!(matches!(err, StoreError::InvalidData(msg) if msg.contains("month")));
    }
}
