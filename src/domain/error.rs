//! Domain Error Types
//!
//! Pure validation errors that don't depend on infrastructure.

use thiserror::Error;

use super::AmountError;

/// Validation failures for ledger input.
///
/// Every variant is a client error: the request must be corrected and
/// resubmitted, retrying it unchanged will fail the same way.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Amount is negative, too large or not an integer
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Kind is not one of credit/debit
    #[error("Invalid transaction kind: {0:?}")]
    InvalidKind(String),

    /// Description length outside 1..=10 characters
    #[error("Description must be between {min} and {max} characters (got {len})")]
    InvalidDescription { len: usize, min: usize, max: usize },

    /// Account id is not a positive integer
    #[error("Invalid account id: {0:?}")]
    InvalidAccountId(String),
}

impl DomainError {
    /// Short machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidKind(_) => "invalid_kind",
            Self::InvalidDescription { .. } => "invalid_description",
            Self::InvalidAccountId(_) => "invalid_account_id",
        }
    }
}
