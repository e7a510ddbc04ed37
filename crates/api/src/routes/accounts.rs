//! Account balance and statement routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{Datelike, Utc};
use ledgerly_core::billing::StatementReport;
use ledgerly_core::ledger::AccountWithBalance;
use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{account_id}/balance", get(get_account_balance))
        .route("/accounts/{account_id}/statement", get(get_statement))
}

/// Response for a single account balance.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub account_name: String,
    /// Balance derived from the transaction log.
    pub balance: Decimal,
}

/// Query parameters for a statement. Missing fields default to the current
/// month.
#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Year the statement closes in.
    pub year: Option<i32>,
    /// Month the statement closes in, 1-12.
    pub month: Option<u32>,
}

/// `GET /accounts`
async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AccountWithBalance>>> {
    let accounts = state.engine.balances_for_user(auth.user_id()).await?;
    Ok(Json(accounts))
}

/// `GET /accounts/{account_id}/balance`
async fn get_account_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<AccountId>,
) -> ApiResult<Json<BalanceResponse>> {
    let AccountWithBalance { account, balance } = state
        .engine
        .account_with_balance(auth.user_id(), account_id)
        .await?;

    Ok(Json(BalanceResponse {
        account_id: account.id,
        account_name: account.name,
        balance,
    }))
}

/// `GET /accounts/{account_id}/statement?year=&month=`
async fn get_statement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<AccountId>,
    Query(query): Query<StatementQuery>,
) -> ApiResult<Json<StatementReport>> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let report = state
        .engine
        .build_statement(auth.user_id(), account_id, year, month)
        .await?;
    Ok(Json(report))
}
