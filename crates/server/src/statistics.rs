//! Statistics API endpoints

use api_types::stats::{AccountAudit, Summary, SummaryQuery};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::TransactionQuery;

use crate::{ServerError, server::ServerState, transactions::transaction_view};

/// Handle requests for the dashboard summary
pub async fn summary(
    State(state): State<ServerState>,
    Query(payload): Query<SummaryQuery>,
) -> Result<Json<Summary>, ServerError> {
    let recent = payload.recent.unwrap_or(TransactionQuery::DEFAULT_LIMIT);
    let summary = state.engine.summary(recent).await?;

    Ok(Json(Summary {
        total_balance_minor: summary.total_balance.cents(),
        open_obligations: summary.open_obligations,
        creditors: summary.creditors,
        recent_transactions: summary
            .recent_transactions
            .into_iter()
            .map(transaction_view)
            .collect(),
    }))
}

/// Handle requests for a balance-versus-log audit of every account
pub async fn audit(
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountAudit>>, ServerError> {
    let audits = state.engine.audit_ledger().await?;

    Ok(Json(
        audits
            .into_iter()
            .map(|audit| AccountAudit {
                consistent: audit.is_consistent(),
                account_id: audit.account_id,
                code: audit.code,
                balance_minor: audit.balance.cents(),
                posted_total_minor: audit.posted_total.cents(),
                transactions: audit.transactions,
            })
            .collect(),
    ))
}
