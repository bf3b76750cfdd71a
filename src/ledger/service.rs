//! Ledger Service
//!
//! The write path: logs a transaction and applies it to the account balance
//! without ever letting the balance drop below `-limit`.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::{AccountBalance, LogPolicy, NewTransaction, RequestContext};
use crate::error::{AppError, AppResult};
use crate::store::{LedgerStore, PostOutcome};

use super::PostTransactionCommand;

/// Service applying transactions to account balances
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    log_policy: LogPolicy,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, log_policy: LogPolicy) -> Self {
        Self { store, log_policy }
    }

    /// Apply the command and return the account's limit and new balance.
    ///
    /// # Errors
    /// - `AppError::AccountNotFound` if the account does not exist
    /// - `AppError::InsufficientLimit` if the balance would drop below `-limit`
    /// - `AppError::Storage` on any store failure; never retried here
    pub async fn apply(
        &self,
        command: PostTransactionCommand,
        context: &RequestContext,
    ) -> AppResult<AccountBalance> {
        let account_id = command.account_id;
        let entry = NewTransaction {
            account_id,
            amount: command.amount,
            kind: command.kind,
            description: command.description,
            occurred_at: Utc::now(),
        };

        let outcome = self.store.post(&entry, self.log_policy).await?;

        match outcome {
            PostOutcome::Applied(account) => {
                debug_assert!(account.within_limit());
                tracing::info!(
                    account_id = %account_id,
                    kind = %entry.kind,
                    amount = %entry.amount,
                    balance = account.balance,
                    correlation_id = %context.correlation_id,
                    "Transaction applied"
                );
                Ok(account)
            }
            PostOutcome::LimitExceeded => {
                tracing::info!(
                    account_id = %account_id,
                    kind = %entry.kind,
                    amount = %entry.amount,
                    log_policy = %self.log_policy,
                    correlation_id = %context.correlation_id,
                    "Transaction rejected: credit limit exceeded"
                );
                Err(AppError::InsufficientLimit(account_id))
            }
            PostOutcome::AccountNotFound => {
                tracing::warn!(
                    account_id = %account_id,
                    correlation_id = %context.correlation_id,
                    "Transaction for unknown account"
                );
                Err(AppError::AccountNotFound(account_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, TransactionKind};
    use crate::store::InMemoryLedgerStore;

    fn account(id: i32) -> AccountId {
        AccountId::new(id).unwrap()
    }

    fn service(policy: LogPolicy) -> (LedgerService, Arc<InMemoryLedgerStore>) {
        let store = Arc::new(InMemoryLedgerStore::new().with_account(account(1), 1000, 0));
        (LedgerService::new(store.clone(), policy), store)
    }

    fn command(kind: &str, amount: i64) -> PostTransactionCommand {
        PostTransactionCommand::parse(account(1), amount, kind, "compra").unwrap()
    }

    #[tokio::test]
    async fn test_credit_and_debit_move_balance_exactly() {
        let (ledger, _) = service(LogPolicy::Accepted);
        let context = RequestContext::new();

        let after_credit = ledger.apply(command("c", 300), &context).await.unwrap();
        assert_eq!(after_credit, AccountBalance::new(1000, 300));

        let after_debit = ledger.apply(command("d", 450), &context).await.unwrap();
        assert_eq!(after_debit, AccountBalance::new(1000, -150));
    }

    #[tokio::test]
    async fn test_debit_past_limit_is_rejected_whole() {
        let (ledger, store) = service(LogPolicy::Accepted);
        let context = RequestContext::new();

        ledger.apply(command("d", 500), &context).await.unwrap();
        let err = ledger.apply(command("d", 600), &context).await.unwrap_err();

        assert!(matches!(err, AppError::InsufficientLimit(id) if id == account(1)));
        assert_eq!(
            store.balance(account(1)).await.unwrap(),
            Some(AccountBalance::new(1000, -500))
        );
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let (ledger, _) = service(LogPolicy::Attempted);
        let cmd = PostTransactionCommand::parse(account(99999), 10, "c", "x").unwrap();

        let err = ledger.apply(cmd, &RequestContext::new()).await.unwrap_err();
        assert!(matches!(err, AppError::AccountNotFound(_)));
    }

    #[tokio::test]
    async fn test_zero_amount_is_accepted() {
        let (ledger, _) = service(LogPolicy::Accepted);
        let result = ledger
            .apply(command("d", 0), &RequestContext::new())
            .await
            .unwrap();
        assert_eq!(result.balance, 0);
    }

    #[tokio::test]
    async fn test_recorded_amount_is_unsigned() {
        let (ledger, store) = service(LogPolicy::Accepted);
        ledger
            .apply(command("d", 70), &RequestContext::new())
            .await
            .unwrap();

        let log = store.recent_transactions(account(1), 10).await.unwrap();
        assert_eq!(log[0].amount.value(), 70);
        assert_eq!(log[0].kind, TransactionKind::Debit);
    }

    #[tokio::test]
    async fn test_balance_overflow_surfaces_as_storage_error() {
        let store = Arc::new(InMemoryLedgerStore::new().with_account(account(1), 0, i64::MAX - 5));
        let ledger = LedgerService::new(store, LogPolicy::Accepted);

        let err = ledger
            .apply(command("c", 10), &RequestContext::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
