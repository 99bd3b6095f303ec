use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};

use std::{sync::Arc, time::Instant};

use crate::{accounts, creditors, obligations, statistics, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Log method, path, status and latency of every request.
async fn trace_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis();
    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, latency_ms, "request failed");
    } else {
        tracing::debug!(%method, %path, status, latency_ms, "request completed");
    }

    response
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/accounts",
            post(accounts::account_new).get(accounts::list),
        )
        .route("/accounts/{id}", get(accounts::get))
        .route("/accounts/{id}/transactions", get(accounts::transactions))
        .route(
            "/creditors",
            post(creditors::creditor_new).get(creditors::list),
        )
        .route("/creditors/{id}", get(creditors::get))
        .route(
            "/obligations",
            post(obligations::obligation_new).get(obligations::list),
        )
        .route("/obligations/{id}", get(obligations::get))
        .route("/obligations/{id}/settle", post(obligations::settle))
        .route("/transactions", get(transactions::list))
        .route("/summary", get(statistics::summary))
        .route("/audit", get(statistics::audit))
        .layer(middleware::from_fn(trace_requests))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
