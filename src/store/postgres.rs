//! PostgreSQL-backed ledger store.
//!
//! The credit limit is enforced by a conditional `UPDATE` whose `WHERE`
//! clause carries the invariant. PostgreSQL takes a row lock for the update
//! and re-evaluates the clause against the latest committed balance, so
//! concurrent posts to one account are serialized by the database while
//! posts to different accounts never contend. The `balance_within_limit`
//! table constraint stays in place underneath as a last line of defence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::db;
use crate::domain::{
    AccountBalance, AccountId, Amount, Description, LogPolicy, NewTransaction, TransactionRecord,
};

use super::{LedgerStore, PostOutcome, StoreError};

/// Ledger store over a shared `PgPool`.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    account_id: i32,
    amount: i64,
    kind: String,
    description: String,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::DomainError| {
            StoreError::CorruptRecord(format!("transaction {}: {}", row.id, e))
        };

        Ok(TransactionRecord {
            id: row.id,
            account_id: AccountId::new(row.account_id).map_err(corrupt)?,
            amount: Amount::new(row.amount).map_err(|e| corrupt(e.into()))?,
            kind: row.kind.trim().parse().map_err(corrupt)?,
            description: Description::new(row.description.as_str()).map_err(corrupt)?,
            occurred_at: row.occurred_at,
        })
    }
}

impl PgLedgerStore {
    /// Create a new store with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the log entry. Returns `false` when the account does not exist.
    async fn append(conn: &mut PgConnection, entry: &NewTransaction) -> Result<bool, StoreError> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO transactions (account_id, amount, kind, description, occurred_at)
            SELECT id, $2, $3, $4, $5
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(entry.account_id.value())
        .bind(entry.amount.value())
        .bind(entry.kind.as_str())
        .bind(entry.description.as_str())
        .bind(entry.occurred_at)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        Ok(rows_affected == 1)
    }

    /// Conditionally apply `delta` to the balance.
    async fn apply_delta(
        conn: &mut PgConnection,
        account_id: AccountId,
        delta: i64,
    ) -> Result<PostOutcome, StoreError> {
        let updated: Option<(i64, i64)> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET balance = balance + $2
            WHERE id = $1 AND balance + $2 >= -credit_limit
            RETURNING credit_limit, balance
            "#,
        )
        .bind(account_id.value())
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| update_error(e, account_id))?;

        if let Some((limit, balance)) = updated {
            return Ok(PostOutcome::Applied(AccountBalance::new(limit, balance)));
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE id = $1)")
            .bind(account_id.value())
            .fetch_one(&mut *conn)
            .await?;

        Ok(if exists {
            PostOutcome::LimitExceeded
        } else {
            PostOutcome::AccountNotFound
        })
    }
}

/// SQLSTATE for `bigint out of range`
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

fn update_error(err: sqlx::Error, account_id: AccountId) -> StoreError {
    let out_of_range = matches!(
        &err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE)
    );

    if out_of_range {
        StoreError::BalanceOutOfRange(account_id)
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn post(
        &self,
        entry: &NewTransaction,
        policy: LogPolicy,
    ) -> Result<PostOutcome, StoreError> {
        match policy {
            LogPolicy::Attempted => {
                let mut conn = self.pool.acquire().await?;

                if !Self::append(&mut conn, entry).await? {
                    return Ok(PostOutcome::AccountNotFound);
                }

                Self::apply_delta(&mut conn, entry.account_id, entry.signed_delta()).await
            }
            LogPolicy::Accepted => {
                let mut tx = self.pool.begin().await?;

                if !Self::append(&mut tx, entry).await? {
                    tx.rollback().await?;
                    return Ok(PostOutcome::AccountNotFound);
                }

                let outcome =
                    Self::apply_delta(&mut tx, entry.account_id, entry.signed_delta()).await?;

                match outcome {
                    PostOutcome::Applied(_) => tx.commit().await?,
                    _ => tx.rollback().await?,
                }

                Ok(outcome)
            }
        }
    }

    async fn balance(&self, account_id: AccountId) -> Result<Option<AccountBalance>, StoreError> {
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT credit_limit, balance FROM accounts WHERE id = $1")
                .bind(account_id.value())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(limit, balance)| AccountBalance::new(limit, balance)))
    }

    async fn recent_transactions(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, account_id, amount, kind, description, occurred_at
            FROM transactions
            WHERE account_id = $1
            ORDER BY occurred_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(account_id.value())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        db::verify_connection(&self.pool).await?;
        Ok(())
    }
}
