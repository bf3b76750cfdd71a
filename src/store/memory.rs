//! In-memory ledger store.
//!
//! Intended for tests/dev. The account set is fixed at construction, so the
//! map itself needs no lock; each account sits behind its own mutex, which
//! makes check-and-update atomic per account without serializing posts to
//! different accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::domain::{AccountBalance, AccountId, LogPolicy, NewTransaction, TransactionRecord};

use super::{LedgerStore, PostOutcome, StoreError};

#[derive(Debug)]
struct AccountSlot {
    balance: AccountBalance,
    log: Vec<TransactionRecord>,
}

/// Thread-safe in-memory implementation of [`LedgerStore`].
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    accounts: HashMap<AccountId, Mutex<AccountSlot>>,
    next_id: AtomicI64,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision an account. Replaces any existing account with the same id.
    pub fn with_account(mut self, account_id: AccountId, limit: i64, balance: i64) -> Self {
        self.accounts.insert(
            account_id,
            Mutex::new(AccountSlot {
                balance: AccountBalance::new(limit, balance),
                log: Vec::new(),
            }),
        );
        self
    }

    fn slot(&self, account_id: AccountId) -> Option<&Mutex<AccountSlot>> {
        self.accounts.get(&account_id)
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn post(
        &self,
        entry: &NewTransaction,
        policy: LogPolicy,
    ) -> Result<PostOutcome, StoreError> {
        let Some(slot) = self.slot(entry.account_id) else {
            return Ok(PostOutcome::AccountNotFound);
        };
        let mut slot = slot.lock().map_err(|_| StoreError::Poisoned)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        slot.log.push(TransactionRecord {
            id,
            account_id: entry.account_id,
            amount: entry.amount,
            kind: entry.kind,
            description: entry.description.clone(),
            occurred_at: entry.occurred_at,
        });

        let next = match slot.balance.checked_apply(entry.signed_delta()) {
            Some(next) if next.within_limit() => next,
            rejected => {
                if policy == LogPolicy::Accepted {
                    slot.log.pop();
                }
                return match rejected {
                    Some(_) => Ok(PostOutcome::LimitExceeded),
                    None => Err(StoreError::BalanceOutOfRange(entry.account_id)),
                };
            }
        };

        slot.balance = next;
        Ok(PostOutcome::Applied(next))
    }

    async fn balance(&self, account_id: AccountId) -> Result<Option<AccountBalance>, StoreError> {
        match self.slot(account_id) {
            Some(slot) => Ok(Some(slot.lock().map_err(|_| StoreError::Poisoned)?.balance)),
            None => Ok(None),
        }
    }

    async fn recent_transactions(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let Some(slot) = self.slot(account_id) else {
            return Ok(Vec::new());
        };

        let mut records = slot.lock().map_err(|_| StoreError::Poisoned)?.log.clone();
        records.sort_by(|a, b| (b.occurred_at, b.id).cmp(&(a.occurred_at, a.id)));
        records.truncate(limit);
        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
