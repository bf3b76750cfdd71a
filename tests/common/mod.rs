//! Common test utilities
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tower::util::ServiceExt;

use credit_ledger::api::{self, AppState};
use credit_ledger::store::InMemoryLedgerStore;
use credit_ledger::{AccountId, LogPolicy};

pub fn account(id: i32) -> AccountId {
    AccountId::new(id).unwrap()
}

/// Router over an in-memory store with account 1 (limit 1000, balance 0)
/// and account 2 (limit 0, balance 0)
pub fn memory_app(policy: LogPolicy) -> Router {
    let store = InMemoryLedgerStore::new()
        .with_account(account(1), 1000, 0)
        .with_account(account(2), 0, 0);
    api::create_router().with_state(AppState::new(Arc::new(store), policy))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_transaction(account_id: i32, amount: i64, kind: &str, description: &str) -> Request<Body> {
    let body = serde_json::json!({
        "amount": amount,
        "kind": kind,
        "description": description,
    });
    post_json(
        &format!("/accounts/{}/transactions", account_id),
        &body.to_string(),
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON body (`Value::Null` when empty or not JSON)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Serializes schema creation across tests in one binary
static SCHEMA_LOCK: Mutex<()> = Mutex::new(());

/// Connect to DATABASE_URL and apply the schema
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    {
        let _guard = SCHEMA_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        pool.execute(include_str!("../../migrations/001_init.sql"))
            .await
            .expect("Failed to apply schema");
    }

    pool
}

/// Recreate a test account with an empty log
pub async fn provision_account(pool: &PgPool, id: i32, limit: i64) {
    let mut tx = pool.begin().await.expect("Failed to begin transaction");

    sqlx::query("DELETE FROM transactions WHERE account_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .expect("Failed to clear transactions");

    sqlx::query(
        r#"
        INSERT INTO accounts (id, credit_limit, balance)
        VALUES ($1, $2, 0)
        ON CONFLICT (id) DO UPDATE SET credit_limit = EXCLUDED.credit_limit, balance = 0
        "#,
    )
    .bind(id)
    .bind(limit)
    .execute(&mut *tx)
    .await
    .expect("Failed to provision account");

    tx.commit().await.expect("Failed to commit transaction");
}
