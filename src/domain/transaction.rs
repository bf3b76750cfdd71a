//! Transaction types
//!
//! Kinds, descriptions, and the records written to the transaction log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AccountId, Amount, DomainError};

/// Minimum description length, in characters
pub const DESCRIPTION_MIN_LEN: usize = 1;

/// Maximum description length, in characters
pub const DESCRIPTION_MAX_LEN: usize = 10;

/// Direction of a transaction.
///
/// Stored and rendered as the single-letter codes `c` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "c", alias = "credit")]
    Credit,
    #[serde(rename = "d", alias = "debit")]
    Debit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "c",
            TransactionKind::Debit => "d",
        }
    }

    /// Signed balance change for `amount` of this kind.
    pub fn signed_delta(&self, amount: Amount) -> i64 {
        amount.signed(matches!(self, TransactionKind::Debit))
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" | "credit" => Ok(TransactionKind::Credit),
            "d" | "debit" => Ok(TransactionKind::Debit),
            other => Err(DomainError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text description, 1 to 10 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let len = value.chars().count();
        if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&len) {
            return Err(DomainError::InvalidDescription {
                len,
                min: DESCRIPTION_MIN_LEN,
                max: DESCRIPTION_MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated transaction about to be written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub description: Description,
    pub occurred_at: DateTime<Utc>,
}

impl NewTransaction {
    /// Balance change this transaction asks for.
    pub fn signed_delta(&self) -> i64 {
        self.kind.signed_delta(self.amount)
    }
}

/// A transaction as persisted in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Insertion sequence, increasing with every append
    pub id: i64,
    pub account_id: AccountId,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub description: Description,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("c".parse::<TransactionKind>().unwrap(), TransactionKind::Credit);
        assert_eq!("debit".parse::<TransactionKind>().unwrap(), TransactionKind::Debit);
        assert!(matches!(
            "x".parse::<TransactionKind>(),
            Err(DomainError::InvalidKind(_))
        ));
        assert!("Credit".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_serde() {
        let kind: TransactionKind = serde_json::from_str(r#""credit""#).unwrap();
        assert_eq!(kind, TransactionKind::Credit);
        assert_eq!(serde_json::to_string(&TransactionKind::Debit).unwrap(), r#""d""#);
    }

    #[test]
    fn test_signed_delta() {
        let amount = Amount::new(500).unwrap();
        assert_eq!(TransactionKind::Debit.signed_delta(amount), -500);
        assert_eq!(TransactionKind::Credit.signed_delta(amount), 500);
    }

    #[test]
    fn test_description_bounds() {
        assert!(Description::new("").is_err());
        assert!(Description::new("a").is_ok());
        assert!(Description::new("0123456789").is_ok());
        assert!(matches!(
            Description::new("01234567890"),
            Err(DomainError::InvalidDescription { len: 11, .. })
        ));
    }

    #[test]
    fn test_description_counts_characters() {
        // ten characters, more than ten bytes
        assert!(Description::new("pão de açú").is_ok());
    }
}
