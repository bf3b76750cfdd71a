//! Ledger module
//!
//! Write path for account balances.

mod commands;
mod service;

pub use commands::PostTransactionCommand;
pub use service::LedgerService;
