//! `SeaORM` entities for the ledger schema.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
