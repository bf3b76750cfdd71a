//! Amount type
//!
//! Domain primitive for monetary amounts moved by a transaction.
//! Amounts are integer minor units and are validated at construction time,
//! so an out-of-range magnitude cannot reach the store.

use std::fmt;

/// Maximum magnitude of a single transaction, in minor units
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Amount represents a validated, unsigned transaction magnitude.
///
/// # Invariants
/// - Value is never negative (zero is accepted)
/// - Maximum value is [`MAX_AMOUNT`]
///
/// # Example
/// ```
/// use credit_ledger::domain::Amount;
///
/// let amount = Amount::new(500).unwrap();
/// assert_eq!(amount.value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(i64),

    #[error("Amount exceeds maximum allowed value ({MAX_AMOUNT})")]
    Overflow,
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    /// - `AmountError::Overflow` if value > [`MAX_AMOUNT`]
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value < 0 {
            return Err(AmountError::Negative(value));
        }

        if value > MAX_AMOUNT {
            return Err(AmountError::Overflow);
        }

        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Return this amount as a balance change, negated for debits.
    pub fn signed(&self, negate: bool) -> i64 {
        if negate {
            -self.0
        } else {
            self.0
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(100);
        assert_eq!(amount.unwrap().value(), 100);
    }

    #[test]
    fn test_amount_zero_accepted() {
        assert!(Amount::new(0).is_ok());
    }

    #[test]
    fn test_amount_negative_rejected() {
        let amount = Amount::new(-1);
        assert!(matches!(amount, Err(AmountError::Negative(-1))));
    }

    #[test]
    fn test_amount_overflow() {
        assert!(matches!(Amount::new(MAX_AMOUNT + 1), Err(AmountError::Overflow)));
        assert!(Amount::new(MAX_AMOUNT).is_ok());
    }

    #[test]
    fn test_amount_signed() {
        let amount = Amount::new(250).unwrap();
        assert_eq!(amount.signed(true), -250);
        assert_eq!(amount.signed(false), 250);
    }
}
