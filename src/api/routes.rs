//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{timestamp, AccountId, RequestContext, TransactionKind, TransactionRecord};
use crate::error::AppError;
use crate::ledger::PostTransactionCommand;
use crate::statement::Statement;

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub amount: i64,
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionResponse {
    pub limit: i64,
    pub balance: i64,
}

#[derive(Debug, Serialize)]
pub struct BalanceSummary {
    pub total: i64,
    pub limit: i64,
    #[serde(serialize_with = "timestamp::serialize")]
    pub statement_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatementEntry {
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub balance: BalanceSummary,
    pub last_transactions: Vec<StatementEntry>,
}

impl From<TransactionRecord> for StatementEntry {
    fn from(record: TransactionRecord) -> Self {
        Self {
            amount: record.amount.value(),
            kind: record.kind,
            description: record.description.as_str().to_string(),
            occurred_at: record.occurred_at,
        }
    }
}

impl From<Statement> for StatementResponse {
    fn from(statement: Statement) -> Self {
        Self {
            balance: BalanceSummary {
                total: statement.balance.balance,
                limit: statement.balance.limit,
                statement_date: statement.as_of,
            },
            last_transactions: statement
                .last_transactions
                .into_iter()
                .map(StatementEntry::from)
                .collect(),
        }
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/accounts/:account_id/transactions", post(post_transaction))
        .route("/accounts/:account_id/statement", get(get_statement))
}

fn parse_account_id(raw: &str) -> Result<AccountId, AppError> {
    Ok(raw.parse::<AccountId>()?)
}

fn request_context(context: Option<Extension<RequestContext>>) -> RequestContext {
    context.map(|Extension(ctx)| ctx).unwrap_or_default()
}

// =========================================================================
// GET /health
// =========================================================================

/// Health check, reports whether the store answers
async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

// =========================================================================
// POST /accounts/:account_id/transactions
// =========================================================================

/// Post a credit or debit against an account
async fn post_transaction(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    context: Option<Extension<RequestContext>>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let account_id = parse_account_id(&account_id)?;
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let command = PostTransactionCommand::parse(
        account_id,
        request.amount,
        &request.kind,
        request.description,
    )?;

    let account = state
        .ledger
        .apply(command, &request_context(context))
        .await?;

    Ok(Json(TransactionResponse {
        limit: account.limit,
        balance: account.balance,
    }))
}

// =========================================================================
// GET /accounts/:account_id/statement
// =========================================================================

/// Current balance and the most recent transactions
async fn get_statement(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    context: Option<Extension<RequestContext>>,
) -> Result<Json<StatementResponse>, AppError> {
    let account_id = parse_account_id(&account_id)?;

    let statement = state
        .statements
        .statement(account_id, &request_context(context))
        .await?;

    Ok(Json(statement.into()))
}
