//! Where the tracker gets its initial transactions from.

use std::time::Duration;

use async_trait::async_trait;
use time::Date;
use time_tz::Tz;

use crate::{
    Error,
    timezone::today,
    transaction::{Category, Transaction, TransactionType},
};

/// How long [SeedDataSource] takes to "fetch" the seed data by default.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1000);

/// Provides the transactions the tracker starts with.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches the initial transactions, newest first.
    ///
    /// Returns `Err(Error::DataSourceUnavailable)` if the transactions cannot be fetched.
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error>;
}

/// A data source that simulates a slow backend by waiting before returning
/// the seed dataset.
#[derive(Clone)]
pub struct SeedDataSource {
    delay: Duration,
    timezone: &'static Tz,
}

impl SeedDataSource {
    /// Create a data source that waits `delay` and dates the seed data
    /// relative to today in `timezone`.
    pub fn new(delay: Duration, timezone: &'static Tz) -> Self {
        Self { delay, timezone }
    }
}

#[async_trait]
impl DataSource for SeedDataSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, Error> {
        tokio::time::sleep(self.delay).await;

        Ok(seed_transactions(today(self.timezone)))
    }
}

/// The demo transactions, dated over the four days up to and including `today`.
pub fn seed_transactions(today: Date) -> Vec<Transaction> {
    let days_ago = |days: i64| today.saturating_sub(time::Duration::days(days));

    vec![
        Transaction {
            id: 1,
            description: "Salary".to_owned(),
            amount: 50000.0,
            category: Category::Salary,
            transaction_type: TransactionType::Income,
            date: days_ago(0),
        },
        Transaction {
            id: 2,
            description: "Grocery Shopping".to_owned(),
            amount: 1500.0,
            category: Category::Food,
            transaction_type: TransactionType::Expense,
            date: days_ago(1),
        },
        Transaction {
            id: 3,
            description: "Freelance Project".to_owned(),
            amount: 8000.0,
            category: Category::Freelance,
            transaction_type: TransactionType::Income,
            date: days_ago(2),
        },
        Transaction {
            id: 4,
            description: "Electric Bill".to_owned(),
            amount: 1200.0,
            category: Category::Utilities,
            transaction_type: TransactionType::Expense,
            date: days_ago(3),
        },
    ]
}
