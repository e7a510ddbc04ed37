//! Ledger engine service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ledgerly_shared::types::{AccountId, BudgetId, UserId};
use rust_decimal::Decimal;
use tracing::warn;

use super::error::EngineError;
use crate::billing::{BillingConfig, StatementReport, assemble_statement};
use crate::budget::{
    Budget, BudgetError, EnrichedBudget, enrich_with_spent, enrich_without_spent,
};
use crate::ledger::{
    Account, AccountWithBalance, BudgetFilter, LedgerStore, StoreError, TransactionFilter,
    compute_balance,
};

/// Read-side computations over a [`LedgerStore`].
///
/// Stateless apart from the store handle; share it behind an `Arc`.
#[derive(Clone)]
pub struct LedgerEngine {
    store: Arc<dyn LedgerStore>,
    query_timeout: Duration,
}

impl std::fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl LedgerEngine {
    /// Deadline applied to each store query unless overridden.
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates an engine reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            store,
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Sets the per-query deadline.
    #[must_use]
    pub const fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Returns the per-query deadline.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Runs one store query under the deadline.
    async fn query<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.query_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.query_timeout))?
    }

    // ========================================================================
    // Accounts & balances
    // ========================================================================

    /// Fetches one of the user's accounts.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if absent, `Upstream` if the store fails.
    pub async fn account(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Account, EngineError> {
        self.query(self.store.fetch_account(user_id, account_id))
            .await?
            .ok_or(EngineError::AccountNotFound(account_id))
    }

    async fn balance_of(&self, user_id: UserId, account: &Account) -> Result<Decimal, StoreError> {
        let transactions = self
            .query(
                self.store
                    .fetch_transactions(user_id, TransactionFilter::for_account(account.id)),
            )
            .await?;
        Ok(compute_balance(account, &transactions))
    }

    /// Derives the current balance of an account.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if absent, `Upstream` if the store fails.
    pub async fn balance(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Decimal, EngineError> {
        Ok(self.account_with_balance(user_id, account_id).await?.balance)
    }

    /// Fetches an account together with its derived balance.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if absent, `Upstream` if the store fails.
    pub async fn account_with_balance(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<AccountWithBalance, EngineError> {
        let account = self.account(user_id, account_id).await?;
        let balance = self.balance_of(user_id, &account).await?;
        Ok(AccountWithBalance { account, balance })
    }

    /// Lists the user's accounts with their balances.
    ///
    /// An account whose transactions cannot be fetched is still listed, with
    /// its initial balance.
    ///
    /// # Errors
    ///
    /// `Upstream` if the account listing itself fails.
    pub async fn balances_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AccountWithBalance>, EngineError> {
        let accounts = self.query(self.store.list_accounts(user_id)).await?;

        let mut listed = Vec::with_capacity(accounts.len());
        for account in accounts {
            let balance = match self.balance_of(user_id, &account).await {
                Ok(balance) => balance,
                Err(e) => {
                    warn!(
                        account_id = %account.id,
                        error = %e,
                        "Failed to compute account balance, reporting initial balance"
                    );
                    account.initial_balance
                }
            };
            listed.push(AccountWithBalance { account, balance });
        }
        Ok(listed)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Builds the credit card statement closing in `(year, month)`.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if absent
    /// - `InvalidAccountType` / `MissingBillingConfig` for non-card accounts,
    ///   raised before any transaction query
    /// - `InvalidBillingInput` for out-of-range year or month
    /// - `Upstream` if the store fails
    pub async fn build_statement(
        &self,
        user_id: UserId,
        account_id: AccountId,
        year: i32,
        month: u32,
    ) -> Result<StatementReport, EngineError> {
        let account = self.account(user_id, account_id).await?;
        self.statement_for_account(&account, year, month).await
    }

    /// Builds the statement of an already-fetched account.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_statement`], minus `AccountNotFound`.
    pub async fn statement_for_account(
        &self,
        account: &Account,
        year: i32,
        month: u32,
    ) -> Result<StatementReport, EngineError> {
        let (period, _) = BillingConfig::from_account(account)?.cycle(year, month)?;

        let filter = TransactionFilter::for_account(account.id).within(period.into());
        let transactions = self
            .query(self.store.fetch_transactions(account.user_id, filter))
            .await?;

        Ok(assemble_statement(account, year, month, transactions)?)
    }

    // ========================================================================
    // Budgets
    // ========================================================================

    async fn spent(&self, budget: &Budget) -> Result<Decimal, EngineError> {
        let period = budget.period()?;
        let spent = self
            .query(
                self.store
                    .sum_expenses(budget.user_id, budget.category_id, period),
            )
            .await?;
        Ok(spent)
    }

    /// Enriches one budget with its spent amount.
    ///
    /// # Errors
    ///
    /// `InvalidBudget` for a malformed month, `Upstream` if the sum fails.
    pub async fn enrich(&self, budget: Budget) -> Result<EnrichedBudget, EngineError> {
        let spent = self.spent(&budget).await?;
        Ok(enrich_with_spent(budget, spent))
    }

    /// Enriches every budget independently, preserving input order.
    ///
    /// A budget whose sum cannot be computed is reported with zero spent.
    pub async fn enrich_many(&self, budgets: Vec<Budget>) -> Vec<EnrichedBudget> {
        let mut enriched = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let item = match self.spent(&budget).await {
                Ok(spent) => enrich_with_spent(budget, spent),
                Err(e) => {
                    warn!(
                        budget_id = %budget.id,
                        error = %e,
                        "Failed to compute budget spending, reporting zero spent"
                    );
                    enrich_without_spent(budget)
                }
            };
            enriched.push(item);
        }
        enriched
    }

    /// Fetches and enriches one of the user's budgets.
    ///
    /// # Errors
    ///
    /// `BudgetNotFound` if absent, otherwise as [`Self::enrich`].
    pub async fn budget(
        &self,
        user_id: UserId,
        budget_id: BudgetId,
    ) -> Result<EnrichedBudget, EngineError> {
        let budget = self
            .query(self.store.fetch_budget(user_id, budget_id))
            .await?
            .ok_or(EngineError::BudgetNotFound(budget_id))?;
        self.enrich(budget).await
    }

    /// Lists and enriches the user's budgets matching `filter`.
    ///
    /// # Errors
    ///
    /// `InvalidBudget` for a month outside 1-12, `Upstream` if the listing
    /// fails. Per-budget sums recover as in [`Self::enrich_many`].
    pub async fn budgets_for_period(
        &self,
        user_id: UserId,
        filter: BudgetFilter,
    ) -> Result<Vec<EnrichedBudget>, EngineError> {
        if let Some(month) = filter.month.filter(|m| !(1..=12).contains(m)) {
            return Err(BudgetError::InvalidPeriod {
                month,
                year: filter.year.unwrap_or_default(),
            }
            .into());
        }

        let budgets = self.query(self.store.list_budgets(user_id, filter)).await?;
        Ok(self.enrich_many(budgets).await)
    }
}
