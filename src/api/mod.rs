//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::LogPolicy;
use crate::ledger::LedgerService;
use crate::statement::StatementService;
use crate::store::LedgerStore;

pub use routes::create_router;

/// Shared handles passed to every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub ledger: LedgerService,
    pub statements: StatementService,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, log_policy: LogPolicy) -> Self {
        Self {
            ledger: LedgerService::new(store.clone(), log_policy),
            statements: StatementService::new(store.clone()),
            store,
        }
    }
}

/// Build the application router with middleware applied
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Outermost first: trace -> timeout -> context -> logging -> handler
    create_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(axum::middleware::from_fn(middleware::context_middleware))
                .layer(axum::middleware::from_fn(middleware::logging_middleware)),
        )
        .with_state(state)
}
