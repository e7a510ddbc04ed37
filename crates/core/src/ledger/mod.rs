//! Ledger read model.
//!
//! This module implements the read side of the transaction log:
//! - Account and transaction domain types
//! - Balance derivation from the transaction log
//! - The `LedgerStore` seam the engine reads through
//! - An in-memory store for tests and local development

pub mod balance;
pub mod memory;
pub mod store;
pub mod types;

pub use balance::{AccountWithBalance, BalanceBreakdown, BalanceEffect, compute_balance};
pub use memory::InMemoryLedgerStore;
pub use store::{BudgetFilter, DateRange, LedgerStore, StoreError, TransactionFilter};
pub use types::{Account, AccountType, ParseTypeError, Transaction, TransactionType};
