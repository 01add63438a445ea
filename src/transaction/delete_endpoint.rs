//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    Error,
    app_state::TrackerState,
    dialog::RequestDialogs,
    home_page::transaction_list_section,
    html::SwapMode,
    statistics::statistics_panel_view,
    transaction::{core::TransactionId, item::request_delete},
};

/// Whether the user confirmed the delete in their browser.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    /// `true` once the user accepted the confirmation prompt.
    #[serde(default)]
    pub confirmed: bool,
}

/// A route handler for deleting a transaction.
///
/// Responds with the transaction list and swaps the statistics panel
/// out-of-band. Responds with no content if the user did not confirm.
pub async fn delete_transaction_endpoint(
    State(state): State<TrackerState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<DeleteQuery>,
) -> Response {
    let mut tracker = match state.lock() {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    let Some(transaction) = tracker.get(transaction_id) else {
        tracing::warn!("tried to delete missing transaction {transaction_id}");
        return Error::DeleteMissingTransaction.into_alert_response();
    };

    let mut dialogs = RequestDialogs::new(query.confirmed);
    let Some(transaction_id) = request_delete(transaction, &mut dialogs) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    tracker.delete(transaction_id);

    html! {
        (transaction_list_section(&tracker, SwapMode::Target))
        (statistics_panel_view(&tracker.statistics(), tracker.currency(), SwapMode::OutOfBand))
    }
    .into_response()
}
