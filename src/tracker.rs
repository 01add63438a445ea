//! The expense tracker owns every transaction and the user's view settings.
//!
//! Everything the pages display is derived from an [ExpenseTracker]: the
//! list is its filtered view and the statistics panel sums its collection.
//! The entry form and the transaction items only ever *ask* the tracker to
//! create or delete a transaction.

use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use time_tz::Tz;

use crate::{
    Error,
    currency::Currency,
    data_source::DataSource,
    preferences::{KeyValueStore, load_currency, save_currency},
    statistics::Statistics,
    timezone::today,
    transaction::{Filter, NewTransaction, Transaction, TransactionId, filter_transactions},
};

/// Where the tracker is in loading its initial transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting on the data source.
    Loading,
    /// The initial transactions have been loaded.
    Loaded,
    /// The data source failed, the string describes why.
    Failed(String),
}

/// The canonical state of the app.
pub struct ExpenseTracker {
    /// Newest first.
    transactions: Vec<Transaction>,
    load_state: LoadState,
    filter: Filter,
    currency: Currency,
    preferences: Box<dyn KeyValueStore + Send>,
    timezone: &'static Tz,
    last_issued_id: TransactionId,
}

impl ExpenseTracker {
    /// Create a tracker that is waiting for its initial transactions.
    ///
    /// The display currency is read from `preferences`. New transactions are
    /// dated with today's date in `timezone`.
    pub fn new(preferences: Box<dyn KeyValueStore + Send>, timezone: &'static Tz) -> Self {
        let currency = load_currency(preferences.as_ref());

        Self {
            transactions: Vec::new(),
            load_state: LoadState::Loading,
            filter: Filter::default(),
            currency,
            preferences,
            timezone,
            last_issued_id: 0,
        }
    }

    /// Whether the initial transactions are still being fetched.
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// How far the initial load has got.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Mark the initial load as in progress.
    pub fn begin_loading(&mut self) {
        tracing::info!("loading transactions");
        self.load_state = LoadState::Loading;
    }

    /// Apply the result of fetching the initial transactions.
    ///
    /// On success the loaded transactions are placed after any transactions
    /// created while loading. On failure nothing is added and the transactions
    /// created while loading are kept.
    pub fn finish_loading(&mut self, result: Result<Vec<Transaction>, Error>) {
        match result {
            Ok(loaded) => {
                tracing::info!("loaded {} transactions", loaded.len());

                if let Some(max_id) = loaded.iter().map(|transaction| transaction.id).max() {
                    self.last_issued_id = self.last_issued_id.max(max_id);
                }

                self.transactions.extend(loaded);
                self.load_state = LoadState::Loaded;
            }
            Err(error) => {
                tracing::error!("could not load transactions: {error}");
                self.load_state = LoadState::Failed(error.to_string());
            }
        }
    }

    /// Every transaction, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The transaction with `id`, if there is one.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The filter applied to the transaction list.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Show only the transactions that match `filter`.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The currency amounts are displayed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Display amounts in `currency` and remember the choice.
    ///
    /// The selection takes effect even if it cannot be saved.
    pub fn select_currency(&mut self, currency: Currency) {
        self.currency = currency;

        if let Err(error) = save_currency(self.preferences.as_mut(), currency) {
            tracing::error!("could not save the currency preference {currency}: {error}");
        }
    }

    /// Add a transaction dated today to the front of the collection.
    pub fn create(&mut self, new_transaction: NewTransaction) -> &Transaction {
        let id = self.next_id();
        let date = today(self.timezone);

        self.transactions
            .insert(0, new_transaction.into_transaction(id, date));
        tracing::info!("created transaction {id}");

        &self.transactions[0]
    }

    /// Remove the transaction with `id`, returning `false` if there is no such transaction.
    pub fn delete(&mut self, id: TransactionId) -> bool {
        match self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
        {
            Some(index) => {
                self.transactions.remove(index);
                tracing::info!("deleted transaction {id}");
                true
            }
            None => {
                tracing::debug!("tried to delete missing transaction {id}");
                false
            }
        }
    }

    /// The totals over every transaction, ignoring the filter.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_transactions(&self.transactions)
    }

    /// The transactions the list should show for the current filter.
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        filter_transactions(&self.transactions, self.filter).collect()
    }

    /// Milliseconds since the Unix epoch, bumped past the last issued ID so
    /// two transactions created in the same millisecond still differ.
    fn next_id(&mut self) -> TransactionId {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as TransactionId;
        let id = now.max(self.last_issued_id + 1);
        self.last_issued_id = id;

        id
    }
}

/// Fetch the initial transactions from `source` and hand them to `tracker`.
///
/// The tracker lock is only held while updating the tracker, never while
/// waiting on the data source.
pub async fn load_transactions(tracker: Arc<Mutex<ExpenseTracker>>, source: Arc<dyn DataSource>) {
    update_tracker(&tracker, ExpenseTracker::begin_loading);

    let result = source.fetch_transactions().await;

    update_tracker(&tracker, |tracker| tracker.finish_loading(result));
}

fn update_tracker(tracker: &Mutex<ExpenseTracker>, update: impl FnOnce(&mut ExpenseTracker)) {
    match tracker.lock() {
        Ok(mut tracker) => update(&mut *tracker),
        Err(error) => tracing::error!("could not acquire the tracker lock: {error}"),
    }
}
