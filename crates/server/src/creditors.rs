//! Creditor API endpoints

use api_types::creditor::{CreditorKind, CreditorNew, CreditorView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::CreditorKind) -> CreditorKind {
    match kind {
        engine::CreditorKind::Organization => CreditorKind::Organization,
        engine::CreditorKind::Individual => CreditorKind::Individual,
    }
}

fn creditor_view(creditor: engine::Creditor) -> CreditorView {
    CreditorView {
        id: creditor.id,
        code: creditor.code,
        name: creditor.name,
        kind: map_kind(creditor.kind),
    }
}

/// Handle requests for registering a creditor
pub async fn creditor_new(
    State(state): State<ServerState>,
    Json(payload): Json<CreditorNew>,
) -> Result<(StatusCode, Json<CreditorView>), ServerError> {
    let kind = match payload.kind {
        CreditorKind::Organization => engine::CreditorKind::Organization,
        CreditorKind::Individual => engine::CreditorKind::Individual,
    };
    let creditor = state.engine.new_creditor(&payload.name, kind).await?;

    Ok((StatusCode::CREATED, Json(creditor_view(creditor))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<CreditorView>>, ServerError> {
    let creditors = state.engine.list_creditors().await?;
    Ok(Json(creditors.into_iter().map(creditor_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(creditor_id): Path<i64>,
) -> Result<Json<CreditorView>, ServerError> {
    let creditor = state.engine.creditor(creditor_id).await?;
    Ok(Json(creditor_view(creditor)))
}
