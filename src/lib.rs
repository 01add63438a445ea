//! An expense tracker web app for recording income and expenses.
//!
//! The app serves a single page of server-rendered HTML that is updated in
//! place with htmx. All transactions are held in memory by an
//! [ExpenseTracker]; the only durable state is the preferred display currency.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod currency;
mod data_source;
mod dialog;
mod endpoints;
mod home_page;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod preferences;
mod routing;
mod statistics;
#[cfg(test)]
mod test_utils;
mod timezone;
mod tracker;
mod transaction;

pub use app_state::{AppState, TrackerState};
pub use currency::Currency;
pub use data_source::{DEFAULT_LOAD_DELAY, DataSource, SeedDataSource, seed_transactions};
pub use dialog::{Dialogs, RequestDialogs};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use preferences::{
    CURRENCY_PREFERENCE_KEY, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
};
pub use routing::build_router;
pub use statistics::Statistics;
pub use tracker::{ExpenseTracker, LoadState, load_transactions};
pub use transaction::{
    Category, EntryForm, FALLBACK_CATEGORY_ICON, Filter, FormError, FormField, NewTransaction,
    Transaction, TransactionDraft, TransactionId, TransactionType,
};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFound};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for the ctrl+c signal: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Validation failures on the entry form are not errors of the application
/// and are reported with [FormError] instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The data source could not provide the initial transactions.
    ///
    /// The string describes the underlying failure and is only intended for
    /// the server logs and the load failure banner.
    #[error("the transactions could not be loaded: {0}")]
    DataSourceUnavailable(String),

    /// An unhandled/unexpected SQL error from the preference store.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The lock guarding the expense tracker was poisoned by a panicking thread.
    #[error("could not acquire the tracker lock")]
    TrackerLockError,

    /// Tried to delete a transaction that is not in the tracker.
    #[error("tried to delete a transaction that does not exist")]
    DeleteMissingTransaction,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::TrackerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an alert fragment for htmx requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                        Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            )
                .into_response(),
            Error::TrackerLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::ErrorSimple {
                    message: "The expense tracker is unavailable, try reloading the page."
                        .to_owned(),
                },
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more \
                                  details."
                            .to_owned(),
                    },
                )
                    .into_response()
            }
        }
    }
}
