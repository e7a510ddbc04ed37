//! In-memory ledger store.
//!
//! Backs the engine in unit tests, API tests and local development. Writes
//! go through the inherent `insert_*`/`remove_*` methods; the engine itself
//! only ever uses the read-only [`LedgerStore`] interface.

use async_trait::async_trait;
use ledgerly_shared::types::{AccountId, BudgetId, CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::store::{BudgetFilter, LedgerStore, StoreError, TransactionFilter};
use super::types::{Account, Transaction, TransactionType};
use crate::budget::{Budget, BudgetPeriod};

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

/// A [`LedgerStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: RwLock<State>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    pub async fn insert_account(&self, account: Account) {
        let mut state = self.state.write().await;
        state.accounts.retain(|a| a.id != account.id);
        state.accounts.push(account);
    }

    /// Appends a transaction to the log.
    pub async fn insert_transaction(&self, transaction: Transaction) {
        self.state.write().await.transactions.push(transaction);
    }

    /// Deletes a transaction, returning it if it existed.
    pub async fn remove_transaction(&self, id: TransactionId) -> Option<Transaction> {
        let mut state = self.state.write().await;
        let index = state.transactions.iter().position(|t| t.id == id)?;
        Some(state.transactions.remove(index))
    }

    /// Adds or replaces a budget.
    pub async fn insert_budget(&self, budget: Budget) {
        let mut state = self.state.write().await;
        state.budgets.retain(|b| b.id != budget.id);
        state.budgets.push(budget);
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn fetch_account(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .iter()
            .find(|a| a.id == account_id && a.user_id == user_id)
            .cloned())
    }

    async fn list_accounts(&self, user_id: UserId) -> Result<Vec<Account>, StoreError> {
        let state = self.state.read().await;
        let mut accounts: Vec<Account> = state
            .accounts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    async fn fetch_transactions(
        &self,
        user_id: UserId,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        let mut transactions: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && filter.matches(t))
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.date);
        Ok(transactions)
    }

    async fn sum_expenses(
        &self,
        user_id: UserId,
        category_id: CategoryId,
        period: BudgetPeriod,
    ) -> Result<Decimal, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .transactions
            .iter()
            .filter(|t| {
                t.user_id == user_id
                    && t.transaction_type == TransactionType::Expense
                    && t.category_id == Some(category_id)
                    && period.contains(t.date)
            })
            .map(|t| t.amount)
            .sum())
    }

    async fn fetch_budget(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
    ) -> Result<Option<Budget>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .budgets
            .iter()
            .find(|b| b.id == budget_id && b.user_id == user_id)
            .cloned())
    }

    async fn list_budgets(
        &self,
        user_id: UserId,
        filter: BudgetFilter,
    ) -> Result<Vec<Budget>, StoreError> {
        let state = self.state.read().await;
        let mut budgets: Vec<Budget> = state
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id && filter.matches(b))
            .cloned()
            .collect();
        budgets.sort_by_key(|b| (b.year, b.month));
        Ok(budgets)
    }
}
