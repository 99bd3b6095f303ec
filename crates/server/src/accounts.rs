//! Account API endpoints

use api_types::{
    account::{AccountNew, AccountView},
    transaction::{TransactionList, TransactionView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{MoneyCents, TransactionQuery};

use crate::{ServerError, server::ServerState, transactions::transaction_view};

pub(crate) fn account_view(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        code: account.code,
        name: account.name,
        balance_minor: account.balance.cents(),
    }
}

/// Handle requests for opening a new account
pub async fn account_new(
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let opened_on = payload
        .opened_on
        .unwrap_or_else(|| Utc::now().date_naive());
    let account = state
        .engine
        .new_account(
            &payload.name,
            MoneyCents::new(payload.opening_balance_minor),
            opened_on,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account_view(account))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(account_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(account_id): Path<i64>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state.engine.account(account_id).await?;
    Ok(Json(account_view(account)))
}

/// Handle requests for the transaction log of one account, newest first
pub async fn transactions(
    State(state): State<ServerState>,
    Path(account_id): Path<i64>,
    Query(payload): Query<TransactionList>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    if payload.account_id.is_some_and(|id| id != account_id) {
        return Err(ServerError::Generic(
            "account_id query does not match the path".to_string(),
        ));
    }

    let limit = payload.limit.unwrap_or(TransactionQuery::DEFAULT_LIMIT);
    let transactions = state
        .engine
        .list_transactions(TransactionQuery::for_account(account_id, limit))
        .await?;

    Ok(Json(transactions.into_iter().map(transaction_view).collect()))
}
