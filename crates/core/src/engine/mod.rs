//! The async façade the service layer calls.
//!
//! [`LedgerEngine`] wires the pure computations in [`crate::ledger`],
//! [`crate::billing`] and [`crate::budget`] to a [`crate::ledger::LedgerStore`]
//! and applies a deadline to every store query.

pub mod error;
pub mod service;


pub use error::EngineError;
pub use service::LedgerEngine;
