//! Store Errors

use crate::domain::AccountId;

/// Errors that can occur in the ledger store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row could not be mapped back to a domain value
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Applying the transaction would overflow the stored balance
    #[error("Balance out of range for account {0}")]
    BalanceOutOfRange(AccountId),

    /// In-memory state is unusable after a panic while it was locked
    #[error("Store lock poisoned")]
    Poisoned,
}
