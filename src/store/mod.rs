//! Ledger Store module
//!
//! Persistence boundary for the account table and the transaction log.
//! The services only see the [`LedgerStore`] trait; the process hands them a
//! shared handle at startup so tests can substitute the in-memory store.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{AccountBalance, AccountId, LogPolicy, NewTransaction, TransactionRecord};

pub use error::StoreError;
pub use memory::InMemoryLedgerStore;
pub use postgres::PgLedgerStore;

/// Result of posting a transaction against an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// Balance updated; carries the limit and the new balance
    Applied(AccountBalance),
    /// The update would push the balance below `-limit`; balance untouched
    LimitExceeded,
    /// No account with that id; nothing was logged
    AccountNotFound,
}

/// Storage operations needed by the ledger and statement services.
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    /// Append `entry` to the log, then apply its signed delta to the account
    /// balance if and only if the result stays within the credit limit.
    ///
    /// The check and the update are one atomic step per account. Whether a
    /// rejected entry stays in the log is decided by `policy`.
    async fn post(
        &self,
        entry: &NewTransaction,
        policy: LogPolicy,
    ) -> Result<PostOutcome, StoreError>;

    /// Current limit and balance, `None` if the account does not exist.
    async fn balance(&self, account_id: AccountId) -> Result<Option<AccountBalance>, StoreError>;

    /// Up to `limit` log entries for the account, newest first.
    async fn recent_transactions(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Connectivity check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
