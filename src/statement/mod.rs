//! Statement module
//!
//! Read-only account statements.

mod service;

pub use service::{Statement, StatementService, STATEMENT_SIZE};
