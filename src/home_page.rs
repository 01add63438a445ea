//! The app's single page and the transaction list section it polls while loading.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    Error,
    app_state::TrackerState,
    currency::currency_selector_view,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, SwapMode, base, loading_spinner},
    statistics::statistics_panel_view,
    tracker::{ExpenseTracker, LoadState},
    transaction::{EntryForm, entry_form_view, transaction_list_view},
};

/// Renders the home page.
pub async fn get_home_page(State(state): State<TrackerState>) -> Result<Response, Error> {
    let tracker = state.lock()?;

    Ok(home_page_view(&tracker).into_response())
}

fn home_page_view(tracker: &ExpenseTracker) -> Markup {
    let currency = tracker.currency();

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="app-header"
            {
                div
                {
                    h1 class="app-title" { "💰 Expense Tracker" }
                    p class="app-subtitle" { "Track your income and expenses" }
                }

                (currency_selector_view(currency))
            }

            (statistics_panel_view(&tracker.statistics(), currency, SwapMode::Target))

            div class="content-grid"
            {
                (entry_form_view(&EntryForm::new(), currency, None, SwapMode::Target))
                (transaction_list_section(tracker, SwapMode::Target))
            }
        }
    };

    base("Home", &content)
}

/// The route handler polled by the loading spinner.
///
/// Once the transactions have loaded, the statistics panel is swapped
/// out-of-band as well since it was rendered before the data arrived.
/// Requests from outside htmx are redirected to the home page.
pub async fn get_transaction_list_endpoint(
    State(state): State<TrackerState>,
    HxRequest(is_htmx_request): HxRequest,
) -> Response {
    if !is_htmx_request {
        return Redirect::to(endpoints::ROOT).into_response();
    }

    let tracker = match state.lock() {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    html! {
        (transaction_list_section(&tracker, SwapMode::Target))

        @if !tracker.is_loading() {
            (statistics_panel_view(&tracker.statistics(), tracker.currency(), SwapMode::OutOfBand))
        }
    }
    .into_response()
}

/// Renders the transaction list card for the tracker's current load state.
///
/// While loading, the card shows a spinner and polls until the load settles.
pub fn transaction_list_section(tracker: &ExpenseTracker, swap: SwapMode) -> Markup {
    match tracker.load_state() {
        LoadState::Loading => html! {
            div
                id="transaction-list"
                class="card list-card"
                hx-swap-oob=[swap.hx_swap_oob()]
                hx-get=(endpoints::TRANSACTIONS_API)
                hx-trigger="load delay:500ms"
                hx-swap="outerHTML"
                aria-busy="true"
            {
                div class="loading"
                {
                    (loading_spinner())
                    p { "Loading transactions..." }
                }
            }
        },
        LoadState::Failed(message) => html! {
            div
                id="transaction-list"
                class="card list-card"
                hx-swap-oob=[swap.hx_swap_oob()]
            {
                div class="load-error" role="alert"
                {
                    p class="load-error-title" { "Could not load transactions" }
                    p class="load-error-details" { (message) }
                }

                (current_list_view(tracker))
            }
        },
        LoadState::Loaded => html! {
            div
                id="transaction-list"
                class="card list-card"
                hx-swap-oob=[swap.hx_swap_oob()]
            {
                (current_list_view(tracker))
            }
        },
    }
}

fn current_list_view(tracker: &ExpenseTracker) -> Markup {
    transaction_list_view(
        &tracker.filtered_transactions(),
        tracker.filter(),
        tracker.currency(),
    )
}
