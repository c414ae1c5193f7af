//! Test utilities for moneta-core
//!
//! This module provides testing infrastructure including a mock of the
//! backend REST API that can be used for development and integration tests.
//! Protected routes require the fixed session token `test-token`; login
//! succeeds with the password `hunter2`.

use axum::extract::{Json, Path};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock backend API server for testing and development
pub struct MockApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApiServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/login/", post(handle_login))
            .route("/register/", post(handle_register))
            .route(
                "/transactions/",
                get(handle_list_transactions).post(handle_create_transaction),
            )
            .route(
                "/transactions/:id/",
                axum::routing::put(handle_update_transaction).delete(handle_delete),
            )
            .route(
                "/savings-goals/",
                get(handle_list_goals).post(handle_create_goal),
            )
            .route(
                "/savings-goals/:id/",
                axum::routing::put(handle_update_goal).delete(handle_delete),
            )
            .route("/expense-predictions/", get(handle_predictions))
            .route("/ai-suggestions/", get(handle_suggestions));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Token test-token") => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn handle_login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "hunter2" {
        (
            StatusCode::OK,
            Json(json!({
                "token": "test-token",
                "user_id": 1,
                "username": body["username"],
                "email": "demo@example.com"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
    }
}

async fn handle_register(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "token": "test-token",
        "user": {
            "id": 2,
            "username": body["username"],
            "email": body["email"]
        }
    }))
}

/// Transaction fixture; the `03/05/2026` date is intentionally malformed so
/// ingest tests can observe one dropped record
async fn handle_list_transactions(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(json!([
        {"id": 1, "name": "Groceries", "type": "expense", "amount": 54.2,
         "category": "Food", "date": "2026-03-02"},
        {"id": 2, "name": null, "type": "income", "amount": "1200.50",
         "category": "Salary", "date": "2026-03-01"},
        {"id": 3, "name": "Bus pass", "type": "expense", "amount": 30,
         "category": "Transportation", "date": "03/05/2026"}
    ])))
}

async fn handle_create_transaction(
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    body["id"] = json!(101);
    Ok(Json(body))
}

async fn handle_update_transaction(
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    body["id"] = json!(id);
    Ok(Json(body))
}

async fn handle_delete(Path(_id): Path<i64>, headers: HeaderMap) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_list_goals(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(json!([
        {"id": 10, "name": "Emergency fund", "target_amount": "1000.00",
         "current_amount": "250.00", "target_date": "2026-12-31"},
        {"id": 11, "name": "New laptop", "target_amount": 1800,
         "current_amount": 900, "target_date": "2026-06-30"}
    ])))
}

async fn handle_create_goal(
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    body["id"] = json!(201);
    Ok(Json(body))
}

async fn handle_update_goal(
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    body["id"] = json!(id);
    Ok(Json(body))
}

async fn handle_predictions(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;

    let week: Vec<Value> = (5..=11)
        .map(|day| {
            json!({
                "date": format!("2026-01-{:02}", day),
                "accumulated_expense": (day - 4) as f64 * 12.5
            })
        })
        .collect();
    let month: Vec<Value> = [1, 15, 31]
        .iter()
        .map(|day| {
            json!({
                "date": format!("2026-01-{:02}", day),
                "accumulated_expense": *day as f64 * 10.0
            })
        })
        .collect();
    let year: Vec<Value> = (1..=12)
        .map(|m| json!({"month": m, "accumulated_expense": m as f64 * 100.0}))
        .collect();

    Ok(Json(json!({
        "this_week_expense": week,
        "this_month_expense": month,
        "this_year_expense": year
    })))
}

async fn handle_suggestions(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&headers)?;
    Ok(Json(json!({
        "suggestions": [
            "Pack lunch twice a week to trim your Food spending.",
            "Your Transportation costs rose this month; consider a transit pass.",
            "Move leftover balance into your Emergency fund goal."
        ]
    })))
}
