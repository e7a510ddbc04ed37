//! Credit card billing cycles and statements.
//!
//! A statement covers the inclusive range from the previous month's closing
//! date to this month's closing date. Closing and due days past the
//! end of a month are clamped to its last day.

pub mod cycle;
pub mod error;
pub mod statement;

pub use cycle::{StatementPeriod, due_date, last_day_of_month, statement_period};
pub use error::{BillingError, StatementError};
pub use statement::{BillingConfig, StatementReport, assemble_statement, statement_total};
