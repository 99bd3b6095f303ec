//! Pending obligation API endpoints

use api_types::obligation::{
    ObligationKind, ObligationNew, ObligationStatus, ObligationView, SettleRequest,
    SettlementView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{MoneyCents, NewObligationCmd, SettleCmd};

use crate::{
    ServerError, accounts::account_view, server::ServerState, transactions::transaction_view,
};

fn map_kind(kind: engine::ObligationKind) -> ObligationKind {
    match kind {
        engine::ObligationKind::Payable => ObligationKind::Payable,
        engine::ObligationKind::Receivable => ObligationKind::Receivable,
        engine::ObligationKind::Loan => ObligationKind::Loan,
    }
}

fn map_status(status: engine::ObligationStatus) -> ObligationStatus {
    match status {
        engine::ObligationStatus::Open => ObligationStatus::Open,
        engine::ObligationStatus::Settled => ObligationStatus::Settled,
    }
}

fn obligation_view(obligation: engine::PendingObligation) -> ObligationView {
    let settlement = obligation.settlement;
    ObligationView {
        id: obligation.id,
        code: obligation.code,
        kind: map_kind(obligation.kind),
        status: map_status(obligation.status),
        title: obligation.title,
        due_date: obligation.due_date,
        amount_minor: obligation.amount.cents(),
        account_id: obligation.account_id,
        creditor_id: obligation.creditor_id,
        paid_amount_minor: settlement.as_ref().map(|s| s.paid_amount.cents()),
        diff_minor: settlement.as_ref().map(|s| s.diff.cents()),
        settled_on: settlement.as_ref().map(|s| s.settled_on),
        transaction_id: settlement.as_ref().map(|s| s.transaction_id),
    }
}

/// Handle requests for recording a new pending obligation
pub async fn obligation_new(
    State(state): State<ServerState>,
    Json(payload): Json<ObligationNew>,
) -> Result<(StatusCode, Json<ObligationView>), ServerError> {
    let kind = engine::ObligationKind::try_from(payload.kind.as_str())?;
    let mut cmd = NewObligationCmd::new(
        kind,
        payload.title,
        payload.due_date,
        MoneyCents::new(payload.amount_minor),
        payload.account_id,
    );
    if let Some(creditor_id) = payload.creditor_id {
        cmd = cmd.creditor_id(creditor_id);
    }

    let obligation = state.engine.new_obligation(cmd).await?;
    Ok((StatusCode::CREATED, Json(obligation_view(obligation))))
}

/// Handle requests for listing obligations, earliest due date first
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ObligationView>>, ServerError> {
    let obligations = state.engine.list_obligations().await?;
    Ok(Json(obligations.into_iter().map(obligation_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(obligation_id): Path<i64>,
) -> Result<Json<ObligationView>, ServerError> {
    let obligation = state.engine.obligation(obligation_id).await?;
    Ok(Json(obligation_view(obligation)))
}

/// Handle requests for settling an open obligation
///
/// A second settlement of the same obligation is answered with `409 Conflict`.
pub async fn settle(
    State(state): State<ServerState>,
    Path(obligation_id): Path<i64>,
    Json(payload): Json<SettleRequest>,
) -> Result<Json<SettlementView>, ServerError> {
    let settled_on = payload
        .settled_on
        .unwrap_or_else(|| Utc::now().date_naive());
    let settlement = state
        .engine
        .settle(SettleCmd::new(
            obligation_id,
            MoneyCents::new(payload.paid_amount_minor),
            settled_on,
        ))
        .await?;

    Ok(Json(SettlementView {
        transaction: transaction_view(settlement.transaction),
        account: account_view(settlement.account),
        obligation: obligation_view(settlement.obligation),
    }))
}
