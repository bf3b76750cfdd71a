//! Command definitions
//!
//! Commands represent intentions to change the system state.

use crate::domain::{AccountId, Amount, Description, DomainError, TransactionKind};

/// Command to post a credit or debit against an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTransactionCommand {
    pub account_id: AccountId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub description: Description,
}

impl PostTransactionCommand {
    pub fn new(
        account_id: AccountId,
        amount: Amount,
        kind: TransactionKind,
        description: Description,
    ) -> Self {
        Self {
            account_id,
            amount,
            kind,
            description,
        }
    }

    /// Validate raw request fields into a command
    pub fn parse(
        account_id: AccountId,
        amount: i64,
        kind: &str,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            account_id,
            Amount::new(amount)?,
            kind.parse()?,
            Description::new(description)?,
        ))
    }
}
