//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use time_tz::Tz;
use tokio::task::JoinHandle;

use crate::{
    Error,
    data_source::DataSource,
    preferences::KeyValueStore,
    timezone::get_timezone,
    tracker::{ExpenseTracker, load_transactions},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The expense tracker shared by every request.
    pub tracker: Arc<Mutex<ExpenseTracker>>,

    local_timezone: &'static Tz,
}

impl AppState {
    /// Create a new [AppState] whose tracker remembers the display currency in `preferences`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        preferences: impl KeyValueStore + Send + 'static,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        let timezone = get_timezone(local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(local_timezone.to_owned()))?;

        let tracker = ExpenseTracker::new(Box::new(preferences), timezone);

        Ok(Self {
            tracker: Arc::new(Mutex::new(tracker)),
            local_timezone: timezone,
        })
    }

    /// The timezone that decides which day "today" is.
    pub fn local_timezone(&self) -> &'static Tz {
        self.local_timezone
    }

    /// Load the tracker's initial transactions from `source` in the background.
    pub fn spawn_initial_load(&self, source: Arc<dyn DataSource>) -> JoinHandle<()> {
        tokio::spawn(load_transactions(self.tracker.clone(), source))
    }
}

/// The state needed by the route handlers that read or change the tracker.
#[derive(Clone)]
pub struct TrackerState {
    /// The expense tracker shared by every request.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
}

impl FromRef<AppState> for TrackerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

impl TrackerState {
    /// Acquire the tracker for the rest of the request.
    ///
    /// # Errors
    /// Returns [Error::TrackerLockError] if the lock was poisoned.
    pub fn lock(&self) -> Result<MutexGuard<'_, ExpenseTracker>, Error> {
        self.tracker.lock().map_err(|error| {
            tracing::error!("could not acquire the tracker lock: {error}");
            Error::TrackerLockError
        })
    }
}
