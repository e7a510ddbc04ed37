//! Engine error types.

use ledgerly_shared::AppError;
use ledgerly_shared::types::{AccountId, BudgetId};
use thiserror::Error;

use crate::billing::{BillingError, StatementError};
use crate::budget::BudgetError;
use crate::ledger::{AccountType, StoreError};

/// Errors returned by [`super::LedgerEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    // ========== Lookup Errors ==========
    /// The user has no such account.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The user has no such budget.
    #[error("Budget not found: {0}")]
    BudgetNotFound(BudgetId),

    // ========== Client Errors ==========
    /// Statement requested for an account that is not a credit card.
    #[error("Account {account_id} is of type {actual}, statements require credit_card")]
    InvalidAccountType {
        /// The account asked for.
        account_id: AccountId,
        /// Its actual type.
        actual: AccountType,
    },

    /// Credit card without closing or due day.
    #[error("Credit card account {0} has no closing or due day")]
    MissingBillingConfig(AccountId),

    /// Out-of-range year, month or day.
    #[error("Invalid billing input: {0}")]
    InvalidBillingInput(#[from] BillingError),

    /// Budget stored with a month/year that is not a calendar month.
    #[error("Invalid budget: {0}")]
    InvalidBudget(#[from] BudgetError),

    // ========== Upstream Errors ==========
    /// The ledger store failed or timed out.
    #[error("Ledger store failure: {0}")]
    Upstream(#[from] StoreError),
}

impl From<StatementError> for EngineError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::InvalidAccountType { account_id, actual } => {
                Self::InvalidAccountType { account_id, actual }
            }
            StatementError::MissingBillingConfig(id) => Self::MissingBillingConfig(id),
            StatementError::Billing(e) => Self::InvalidBillingInput(e),
        }
    }
}

impl EngineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "account_not_found",
            Self::BudgetNotFound(_) => "budget_not_found",
            Self::InvalidAccountType { .. } => "invalid_account_type",
            Self::MissingBillingConfig(_) => "missing_billing_config",
            Self::InvalidBillingInput(_) => "invalid_billing_input",
            Self::InvalidBudget(_) => "invalid_budget",
            Self::Upstream(_) => "upstream_failure",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound(_) | Self::BudgetNotFound(_) => 404,

            Self::InvalidAccountType { .. }
            | Self::MissingBillingConfig(_)
            | Self::InvalidBillingInput(_)
            | Self::InvalidBudget(_) => 400,

            Self::Upstream(_) => 500,
        }
    }

    /// Returns true if the error came from the store rather than the request.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::AccountNotFound(_) | EngineError::BudgetNotFound(_) => {
                Self::NotFound(message)
            }
            EngineError::InvalidAccountType { .. }
            | EngineError::MissingBillingConfig(_)
            | EngineError::InvalidBillingInput(_)
            | EngineError::InvalidBudget(_) => Self::Validation(message),
            EngineError::Upstream(_) => Self::Upstream(message),
        }
    }
}
