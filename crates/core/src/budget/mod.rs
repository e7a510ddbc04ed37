//! Monthly budgets and their enrichment with spending from the ledger.

pub mod enrichment;
pub mod error;
pub mod types;

pub use enrichment::{enrich_with_spent, enrich_without_spent};
pub use error::BudgetError;
pub use types::{Budget, BudgetPeriod, EnrichedBudget};
