//! Statement Service
//!
//! Read path: current balance plus the most recent log entries. The two
//! reads are independent; a statement taken during a concurrent post may
//! show the new balance without the new entry or the reverse.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{AccountBalance, AccountId, RequestContext, TransactionRecord};
use crate::error::{AppError, AppResult};
use crate::store::LedgerStore;

/// Number of log entries included in a statement
pub const STATEMENT_SIZE: usize = 10;

/// Snapshot of an account for display
#[derive(Debug, Clone)]
pub struct Statement {
    pub account_id: AccountId,
    pub balance: AccountBalance,
    pub as_of: DateTime<Utc>,
    /// Newest first, at most [`STATEMENT_SIZE`] entries
    pub last_transactions: Vec<TransactionRecord>,
}

/// Service composing account statements
#[derive(Clone)]
pub struct StatementService {
    store: Arc<dyn LedgerStore>,
}

impl StatementService {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn statement(
        &self,
        account_id: AccountId,
        context: &RequestContext,
    ) -> AppResult<Statement> {
        let balance = self
            .store
            .balance(account_id)
            .await?
            .ok_or(AppError::AccountNotFound(account_id))?;

        let last_transactions = self
            .store
            .recent_transactions(account_id, STATEMENT_SIZE)
            .await?;

        tracing::debug!(
            account_id = %account_id,
            entries = last_transactions.len(),
            correlation_id = %context.correlation_id,
            "Statement composed"
        );

        Ok(Statement {
            account_id,
            balance,
            as_of: Utc::now(),
            last_transactions,
        })
    }
}
