use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use server::{ServerState, router};

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_account(app: &Router, name: &str, opening: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/accounts",
        Some(json!({ "name": name, "opening_balance_minor": opening, "opened_on": "2026-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn account_lifecycle() {
    let app = app().await;
    let id = open_account(&app, "Checking", 1_000).await;

    let (status, body) = send(&app, "GET", &format!("/accounts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Checking");
    assert_eq!(body["balance_minor"], 1_000);
    assert!(body["code"].as_str().unwrap().starts_with("ACC-"));

    let (status, body) = send(&app, "GET", &format!("/accounts/{id}/transactions"), None).await;
    assert_eq!(status, StatusCode::OK);
    let txs = body.as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["description"], "Opening balance");
    assert_eq!(txs[0]["amount_minor"], 1_000);
    assert_eq!(txs[0]["posted_on"], "2026-01-01");

    let (status, body) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_account_is_404() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/accounts/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn blank_account_name_is_422() {
    let app = app().await;
    let (status, _) = send(&app, "POST", "/accounts", Some(json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn creditors_default_to_organization() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/creditors", Some(json!({ "name": "Power Co" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "organization");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/creditors",
        Some(json!({ "name": "Aunt May", "kind": "individual" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "individual");

    let (status, body) = send(&app, "GET", &format!("/creditors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Power Co");

    let (status, body) = send(&app, "GET", "/creditors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn settle_payable_then_reject_second_settlement() {
    let app = app().await;
    let account_id = open_account(&app, "Checking", 1_000).await;

    let (status, obligation) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Electricity",
            "due_date": "2026-01-15",
            "amount_minor": 100,
            "kind": "PAYABLE",
            "account_id": account_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{obligation}");
    assert_eq!(obligation["status"], "OPEN");
    assert!(obligation["paid_amount_minor"].is_null());
    let id = obligation["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/obligations/{id}/settle"),
        Some(json!({ "paid_amount_minor": 120, "settled_on": "2026-01-16" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["transaction"]["amount_minor"], -120);
    assert_eq!(body["transaction"]["description"], "[PAYABLE] Electricity");
    assert_eq!(body["account"]["balance_minor"], 880);
    assert_eq!(body["obligation"]["status"], "SETTLED");
    assert_eq!(body["obligation"]["diff_minor"], 20);
    assert_eq!(body["obligation"]["settled_on"], "2026-01-16");
    assert_eq!(
        body["obligation"]["transaction_id"],
        body["transaction"]["id"]
    );

    let (status, body) = send(
        &app,
        "POST",
        &format!("/obligations/{id}/settle"),
        Some(json!({ "paid_amount_minor": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (_, account) = send(&app, "GET", &format!("/accounts/{account_id}"), None).await;
    assert_eq!(account["balance_minor"], 880);
}

#[tokio::test]
async fn receivable_settlement_credits_the_account() {
    let app = app().await;
    let account_id = open_account(&app, "Savings", 0).await;

    let (_, obligation) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Refund",
            "due_date": "2026-02-01",
            "amount_minor": 50,
            "kind": "receivable",
            "account_id": account_id,
        })),
    )
    .await;
    let id = obligation["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/obligations/{id}/settle"),
        Some(json!({ "paid_amount_minor": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transaction"]["amount_minor"], 50);
    assert_eq!(body["account"]["balance_minor"], 50);
    assert_eq!(body["obligation"]["diff_minor"], 0);
}

#[tokio::test]
async fn obligation_input_errors_are_422() {
    let app = app().await;
    let account_id = open_account(&app, "Checking", 0).await;

    let (status, _) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Rent",
            "due_date": "2026-01-01",
            "amount_minor": 100,
            "kind": "GIFT",
            "account_id": account_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Rent",
            "due_date": "2026-01-01",
            "amount_minor": 0,
            "kind": "PAYABLE",
            "account_id": account_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Rent",
            "due_date": "2026-01-01",
            "amount_minor": 100,
            "kind": "PAYABLE",
            "account_id": account_id + 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_payment_is_422_and_unknown_obligation_is_404() {
    let app = app().await;
    let account_id = open_account(&app, "Checking", 0).await;
    let (_, obligation) = send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Loan",
            "due_date": "2026-03-01",
            "amount_minor": 500,
            "kind": "LOAN",
            "account_id": account_id,
        })),
    )
    .await;
    let id = obligation["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/obligations/{id}/settle"),
        Some(json!({ "paid_amount_minor": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/obligations/999/settle",
        Some(json!({ "paid_amount_minor": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", &format!("/obligations/{id}"), None).await;
    assert_eq!(body["status"], "OPEN");
}

#[tokio::test]
async fn summary_transactions_and_audit() {
    let app = app().await;
    let checking = open_account(&app, "Checking", 1_000).await;
    let savings = open_account(&app, "Savings", 2_500).await;
    send(&app, "POST", "/creditors", Some(json!({ "name": "Bank" }))).await;
    send(
        &app,
        "POST",
        "/obligations",
        Some(json!({
            "title": "Card",
            "due_date": "2026-01-20",
            "amount_minor": 300,
            "kind": "PAYABLE",
            "account_id": checking,
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/summary?recent=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_balance_minor"], 3_500);
    assert_eq!(body["open_obligations"], 1);
    assert_eq!(body["creditors"], 1);
    let recent = body["recent_transactions"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["account_id"], savings);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/transactions?account_id={checking}&limit=5"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/audit", None).await;
    assert_eq!(status, StatusCode::OK);
    let audits = body.as_array().unwrap();
    assert_eq!(audits.len(), 2);
    assert!(audits.iter().all(|audit| audit["consistent"] == true));
}

#[tokio::test]
async fn run_with_listener_serves_the_router() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::run_with_listener(engine, listener));

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /accounts HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("[]"), "{response}");
}
