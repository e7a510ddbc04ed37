//! Ledger and billing computation engine for Ledgerly.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every figure it produces (balances, statement totals, budget spending) is
//! derived from the transaction log on read; nothing is cached or stored.
//!
//! # Modules
//!
//! - `ledger` - Accounts, transactions, balance derivation and the store seam
//! - `billing` - Credit card billing cycles and statements
//! - `budget` - Monthly budget periods and enrichment
//! - `engine` - Orchestration over a `LedgerStore` with query deadlines

pub mod billing;
pub mod budget;
pub mod engine;
pub mod ledger;

pub use engine::{EngineError, LedgerEngine};
