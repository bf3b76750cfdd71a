//! Domain module
//!
//! Core domain types and validation rules.

pub mod account;
pub mod amount;
pub mod context;
pub mod error;
pub mod policy;
pub mod timestamp;
pub mod transaction;

pub use account::{AccountBalance, AccountId};
pub use amount::{Amount, AmountError, MAX_AMOUNT};
pub use context::RequestContext;
pub use error::DomainError;
pub use policy::{LogPolicy, UnknownLogPolicy};
pub use transaction::{
    Description, NewTransaction, TransactionKind, TransactionRecord, DESCRIPTION_MAX_LEN,
    DESCRIPTION_MIN_LEN,
};
