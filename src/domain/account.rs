//! Account identity and balance snapshot.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Identifier of a provisioned account.
///
/// Always a positive integer; accounts are created out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AccountId(i32);

impl AccountId {
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidAccountId(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i32>()
            .map_err(|_| DomainError::InvalidAccountId(s.to_string()))?;
        AccountId::new(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Credit limit and current balance of an account at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    /// How far the balance may go below zero
    pub limit: i64,
    pub balance: i64,
}

impl AccountBalance {
    pub fn new(limit: i64, balance: i64) -> Self {
        Self { limit, balance }
    }

    /// Whether `balance >= -limit` holds.
    pub fn within_limit(&self) -> bool {
        self.balance >= -self.limit
    }

    /// Balance after applying `delta`, or `None` if it overflows.
    /// The result may still break the limit; see [`Self::within_limit`].
    pub fn checked_apply(&self, delta: i64) -> Option<AccountBalance> {
        let balance = self.balance.checked_add(delta)?;
        Some(AccountBalance::new(self.limit, balance))
    }
}
