use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::{
    ExpenseTracker, KeyValueStore, app_state::TrackerState, data_source::seed_transactions,
    timezone::get_timezone,
};

/// A tracker that has finished loading the seed transactions, using `preferences`
/// for the display currency.
pub(crate) fn test_tracker_state(preferences: impl KeyValueStore + Send + 'static) -> TrackerState {
    let mut tracker = ExpenseTracker::new(
        Box::new(preferences),
        get_timezone("Etc/UTC").expect("UTC should be a known timezone"),
    );
    tracker.finish_loading(Ok(seed_transactions(OffsetDateTime::now_utc().date())));

    TrackerState {
        tracker: Arc::new(Mutex::new(tracker)),
    }
}
