//! Billing error types.

use ledgerly_shared::types::AccountId;
use thiserror::Error;

use crate::ledger::AccountType;

/// Calendar inputs rejected by the billing cycle calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Closing or due day outside 1-31.
    #[error("Invalid billing day: {0} (expected 1-31)")]
    InvalidDay(u32),

    /// Month outside 1-12.
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    /// Year/month pair chrono cannot represent.
    #[error("Invalid date: {year}-{month:02}")]
    InvalidDate {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}

/// Errors raised while building a statement for an account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Statements only exist for credit card accounts.
    #[error("Account {account_id} is of type {actual}, statements require credit_card")]
    InvalidAccountType {
        /// The account asked for.
        account_id: AccountId,
        /// Its actual type.
        actual: AccountType,
    },

    /// A credit card account without closing or due day.
    #[error("Credit card account {0} has no closing or due day")]
    MissingBillingConfig(AccountId),

    /// Out-of-range calendar input.
    #[error(transparent)]
    Billing(#[from] BillingError),
}
