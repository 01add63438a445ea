//! Durable key-value storage for user preferences.
//!
//! The expense tracker only remembers one preference, the display currency,
//! but it talks to storage through [KeyValueStore] so tests can substitute
//! an in-memory store for the SQLite one.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, currency::Currency};

/// The key under which the display currency is stored.
pub const CURRENCY_PREFERENCE_KEY: &str = "expense-tracker-currency";

/// A store of string values addressed by string keys.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// A [KeyValueStore] backed by a table in a SQLite database.
pub struct SqliteKeyValueStore {
    connection: Connection,
}

impl SqliteKeyValueStore {
    /// Create a store on `connection`, creating the preference table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_preference_table(&connection)?;

        Ok(Self { connection })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row(
                "SELECT value FROM preference WHERE key = :key",
                &[(":key", key)],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO preference (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}

/// Create the preference table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preference (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// A [KeyValueStore] that lives in memory.
///
/// Clones share the same entries, so a clone kept by a test sees everything
/// written through the store handed to the tracker.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().map_err(|_| Error::TrackerLockError)?;

        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| Error::TrackerLockError)?;
        entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

/// Read the preferred display currency.
///
/// Falls back to [Currency::Inr] when nothing is stored, the stored code is
/// not a supported currency, or the store cannot be read.
pub fn load_currency(store: &dyn KeyValueStore) -> Currency {
    match store.get(CURRENCY_PREFERENCE_KEY) {
        Ok(Some(code)) => code.parse().unwrap_or_else(|error| {
            tracing::warn!("ignoring stored currency preference: {error}");
            Currency::default()
        }),
        Ok(None) => Currency::default(),
        Err(error) => {
            tracing::error!("could not read the currency preference: {error}");
            Currency::default()
        }
    }
}

/// Remember `currency` as the preferred display currency.
///
/// # Errors
/// Returns an error if the store cannot be written.
pub fn save_currency(store: &mut dyn KeyValueStore, currency: Currency) -> Result<(), Error> {
    store.set(CURRENCY_PREFERENCE_KEY, currency.code())
}
