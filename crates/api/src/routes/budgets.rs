//! Budget routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use ledgerly_core::budget::EnrichedBudget;
use ledgerly_core::ledger::BudgetFilter;
use ledgerly_shared::types::BudgetId;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets))
        .route("/budgets/{budget_id}", get(get_budget))
}

/// `GET /budgets?month=&year=`
async fn list_budgets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<BudgetFilter>,
) -> ApiResult<Json<Vec<EnrichedBudget>>> {
    let budgets = state
        .engine
        .budgets_for_period(auth.user_id(), filter)
        .await?;
    Ok(Json(budgets))
}

/// `GET /budgets/{budget_id}`
async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(budget_id): Path<BudgetId>,
) -> ApiResult<Json<EnrichedBudget>> {
    let budget = state.engine.budget(auth.user_id(), budget_id).await?;
    Ok(Json(budget))
}
