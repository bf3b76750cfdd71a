//! credit_ledger Library
//!
//! Re-exports modules for integration testing and the binaries.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod ledger;
pub mod statement;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{AccountBalance, AccountId, Amount, DomainError, LogPolicy, RequestContext};
pub use error::{AppError, AppResult, ErrorResponse};
