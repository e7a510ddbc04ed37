//! Repository implementations for database operations.

pub mod ledger;
pub mod mapping;

pub use ledger::{LedgerRepository, LedgerRepositoryError};
