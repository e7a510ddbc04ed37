//! Budget error types.

use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Month outside 1-12, or a year chrono cannot represent.
    #[error("Invalid budget period: {year}-{month:02}")]
    InvalidPeriod {
        /// Requested month.
        month: u32,
        /// Requested year.
        year: i32,
    },
}
