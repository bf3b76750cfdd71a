//! Concurrency load test against PostgreSQL
//!
//! Run with: cargo run --bin load_test --release -- --account 1 --requests 200 --amount 1000
//!
//! Fires concurrent debits at one account and checks that the balance never
//! went past the credit limit. Leaves the account debited; reseed afterwards.

use std::sync::Arc;
use std::time::Instant;

use credit_ledger::ledger::{LedgerService, PostTransactionCommand};
use credit_ledger::store::{LedgerStore, PgLedgerStore};
use credit_ledger::{db, AccountId, AppError, Config, RequestContext};

fn arg<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let account_id = AccountId::new(arg(&args, "--account", 1))?;
    let requests: usize = arg(&args, "--requests", 200);
    let amount: i64 = arg(&args, "--amount", 1000);

    let config = Config::from_env()?;

    println!(
        "Load Test - {} concurrent debits of {} against account {} ({} policy)",
        requests, amount, account_id, config.log_policy
    );
    println!("Connecting to database...");

    let pool = db::connect(&config).await?;
    let store = Arc::new(PgLedgerStore::new(pool));
    let ledger = LedgerService::new(store.clone(), config.log_policy);

    let before = store
        .balance(account_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("account {} does not exist", account_id))?;

    let command = PostTransactionCommand::parse(account_id, amount, "d", "load")?;

    let start = Instant::now();
    let mut handles = Vec::with_capacity(requests);

    for _ in 0..requests {
        let ledger = ledger.clone();
        let command = command.clone();
        handles.push(tokio::spawn(async move {
            ledger.apply(command, &RequestContext::new()).await
        }));
    }

    let mut accepted = 0u64;
    let mut rejected = 0u64;
    let mut failed = 0u64;

    for handle in handles {
        match handle.await? {
            Ok(_) => accepted += 1,
            Err(AppError::InsufficientLimit(_)) => rejected += 1,
            Err(e) => {
                eprintln!("Unexpected error: {}", e);
                failed += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    let after = store
        .balance(account_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("account {} disappeared", account_id))?;

    let expected_balance = before.balance - amount * accepted as i64;

    println!("\n=== Load Test Results ===");
    println!("Accepted: {}", accepted);
    println!("Rejected (limit): {}", rejected);
    println!("Failed: {}", failed);
    println!("Balance: {} -> {} (limit {})", before.balance, after.balance, after.limit);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "Rate: {:.0} requests/sec",
        requests as f64 / elapsed.as_secs_f64()
    );

    if !after.within_limit() || after.balance != expected_balance {
        anyhow::bail!(
            "invariant broken: balance {} (expected {}), limit {}",
            after.balance,
            expected_balance,
            after.limit
        );
    }

    println!("Invariant held.");
    Ok(())
}
