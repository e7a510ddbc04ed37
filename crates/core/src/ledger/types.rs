//! Ledger domain types.
//!
//! Accounts and transactions as the engine sees them. Both are read-only
//! here; creation and validation belong to the write side.

use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a stored type label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseTypeError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected label.
    pub value: String,
}

/// Account type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking account.
    Checking,
    /// Savings account.
    Savings,
    /// Credit card with a monthly billing cycle.
    CreditCard,
    /// Anything else (cash, wallet, ...).
    Other,
}

impl AccountType {
    /// Returns the storage label for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::CreditCard => "credit_card",
            Self::Other => "other",
        }
    }

    /// Returns true if statements can be produced for this type.
    #[must_use]
    pub const fn has_billing_cycle(&self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit_card" => Ok(Self::CreditCard),
            "other" => Ok(Self::Other),
            _ => Err(ParseTypeError {
                kind: "account type",
                value: s.to_string(),
            }),
        }
    }
}

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money arriving on the source account.
    Income,
    /// Money leaving the source account.
    Expense,
    /// Money moving from the source account to the destination account.
    Transfer,
}

impl TransactionType {
    /// Returns the storage label for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(ParseTypeError {
                kind: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

/// An account owned by a user.
///
/// The balance is never stored; see [`crate::ledger::compute_balance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Balance before the first recorded transaction.
    pub initial_balance: Decimal,
    /// Credit limit (credit cards only).
    pub credit_limit: Option<Decimal>,
    /// Statement closing day of month, 1-31 (credit cards only).
    pub closing_day: Option<u32>,
    /// Payment due day of month, 1-31 (credit cards only).
    pub due_day: Option<u32>,
}

/// A single immutable ledger event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Free-form description.
    pub description: String,
    /// Amount, strictly positive.
    pub amount: Decimal,
    /// Booking date.
    pub date: NaiveDate,
    /// Transaction type.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Source account.
    pub account_id: AccountId,
    /// Destination account (transfers only).
    pub destination_account_id: Option<AccountId>,
    /// Spending category.
    pub category_id: Option<CategoryId>,
}

impl Transaction {
    /// Returns true if the account is the source or the destination.
    #[must_use]
    pub fn touches(&self, account_id: AccountId) -> bool {
        self.account_id == account_id || self.destination_account_id == Some(account_id)
    }
}
