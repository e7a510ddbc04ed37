//! `SeaORM` active enums mirroring PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Checking account.
    #[sea_orm(string_value = "checking")]
    Checking,
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Credit card with a billing cycle.
    #[sea_orm(string_value = "credit_card")]
    CreditCard,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// `transaction_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    /// Money arriving on the source account.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money leaving the source account.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Money moving from the source to the destination account.
    #[sea_orm(string_value = "transfer")]
    Transfer,
}
