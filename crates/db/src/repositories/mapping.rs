//! Conversions from database rows to engine domain types.

use ledgerly_core::budget::Budget;
use ledgerly_core::ledger::{Account, AccountType, Transaction, TransactionType};
use ledgerly_shared::types::{AccountId, BudgetId, CategoryId, TransactionId, UserId};

use super::ledger::LedgerRepositoryError;
use crate::entities::{accounts, budgets, sea_orm_active_enums, transactions};

impl From<sea_orm_active_enums::AccountType> for AccountType {
    fn from(value: sea_orm_active_enums::AccountType) -> Self {
        match value {
            sea_orm_active_enums::AccountType::Checking => Self::Checking,
            sea_orm_active_enums::AccountType::Savings => Self::Savings,
            sea_orm_active_enums::AccountType::CreditCard => Self::CreditCard,
            sea_orm_active_enums::AccountType::Other => Self::Other,
        }
    }
}

impl From<AccountType> for sea_orm_active_enums::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Checking => Self::Checking,
            AccountType::Savings => Self::Savings,
            AccountType::CreditCard => Self::CreditCard,
            AccountType::Other => Self::Other,
        }
    }
}

impl From<sea_orm_active_enums::TransactionType> for TransactionType {
    fn from(value: sea_orm_active_enums::TransactionType) -> Self {
        match value {
            sea_orm_active_enums::TransactionType::Income => Self::Income,
            sea_orm_active_enums::TransactionType::Expense => Self::Expense,
            sea_orm_active_enums::TransactionType::Transfer => Self::Transfer,
        }
    }
}

impl From<TransactionType> for sea_orm_active_enums::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
            TransactionType::Transfer => Self::Transfer,
        }
    }
}

fn day(
    column: &'static str,
    value: Option<i16>,
) -> Result<Option<u32>, LedgerRepositoryError> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| LedgerRepositoryError::InvalidRow {
                column,
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Converts an `accounts` row.
///
/// # Errors
///
/// Returns `InvalidRow` for a negative closing or due day.
pub fn account_from_model(model: accounts::Model) -> Result<Account, LedgerRepositoryError> {
    Ok(Account {
        id: AccountId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        name: model.name,
        account_type: model.account_type.into(),
        initial_balance: model.initial_balance,
        credit_limit: model.credit_limit,
        closing_day: day("closing_day", model.closing_day)?,
        due_day: day("due_day", model.due_day)?,
    })
}

/// Converts a `transactions` row.
#[must_use]
pub fn transaction_from_model(model: transactions::Model) -> Transaction {
    Transaction {
        id: TransactionId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        description: model.description,
        amount: model.amount,
        date: model.transaction_date,
        transaction_type: model.transaction_type.into(),
        account_id: AccountId::from_uuid(model.account_id),
        destination_account_id: model.destination_account_id.map(AccountId::from_uuid),
        category_id: model.category_id.map(CategoryId::from_uuid),
    }
}

/// Converts a `budgets` row.
///
/// # Errors
///
/// Returns `InvalidRow` for a negative month.
pub fn budget_from_model(model: budgets::Model) -> Result<Budget, LedgerRepositoryError> {
    let month = u32::try_from(model.month).map_err(|_| LedgerRepositoryError::InvalidRow {
        column: "month",
        value: model.month.to_string(),
    })?;

    Ok(Budget {
        id: BudgetId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        category_id: CategoryId::from_uuid(model.category_id),
        month,
        year: model.year,
        amount: model.amount,
    })
}
