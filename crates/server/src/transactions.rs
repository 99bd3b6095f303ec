//! Transactions API endpoints

use api_types::transaction::{TransactionList, TransactionView};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::TransactionQuery;

use crate::{ServerError, server::ServerState};

pub(crate) fn transaction_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        code: tx.code,
        account_id: tx.account_id,
        description: tx.description,
        amount_minor: tx.amount.cents(),
        posted_on: tx.posted_on,
    }
}

/// Handle requests for the most recent transactions, optionally for one account
pub async fn list(
    State(state): State<ServerState>,
    Query(payload): Query<TransactionList>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let query = TransactionQuery {
        account_id: payload.account_id,
        limit: payload.limit.unwrap_or(TransactionQuery::DEFAULT_LIMIT),
    };
    let transactions = state.engine.list_transactions(query).await?;

    Ok(Json(transactions.into_iter().map(transaction_view).collect()))
}
