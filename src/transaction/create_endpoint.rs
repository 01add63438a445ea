//! Defines the endpoints for the entry form: submitting it and re-rendering
//! it when the transaction type changes.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since it handles repeated and empty fields
// more forgivingly than axum::Form.
use axum_extra::extract::Form;
use maud::html;

use crate::{
    app_state::TrackerState,
    dialog::RequestDialogs,
    home_page::transaction_list_section,
    html::SwapMode,
    statistics::statistics_panel_view,
    transaction::form::{EntryForm, TransactionDraft, entry_form_view},
};

/// A route handler for submitting the entry form.
///
/// On success responds with a fresh entry form and swaps the statistics
/// panel and transaction list out-of-band. On a validation failure responds
/// with the entry form holding what the user typed and a dialog explaining
/// what to fix.
pub async fn create_transaction_endpoint(
    State(state): State<TrackerState>,
    Form(draft): Form<TransactionDraft>,
) -> Response {
    let mut tracker = match state.lock() {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    let currency = tracker.currency();
    let mut form = EntryForm::from_draft(draft);
    let mut dialogs = RequestDialogs::default();

    let Some(new_transaction) = form.submit(&mut dialogs) else {
        return entry_form_view(&form, currency, dialogs.last_alert(), SwapMode::Target)
            .into_response();
    };

    tracker.create(new_transaction);

    html! {
        (entry_form_view(&form, currency, None, SwapMode::Target))
        (statistics_panel_view(&tracker.statistics(), currency, SwapMode::OutOfBand))
        (transaction_list_section(&tracker, SwapMode::OutOfBand))
    }
    .into_response()
}

/// A route handler that renders the entry form for the type the user just
/// selected, keeping the other values they typed.
pub async fn get_entry_form_endpoint(
    State(state): State<TrackerState>,
    Query(draft): Query<TransactionDraft>,
) -> Response {
    let currency = match state.lock() {
        Ok(tracker) => tracker.currency(),
        Err(error) => return error.into_alert_response(),
    };

    let transaction_type = draft.transaction_type;
    let mut form = EntryForm::from_draft(draft);
    form.change_type(transaction_type);

    entry_form_view(&form, currency, None, SwapMode::Target).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};

    use crate::{
        MemoryKeyValueStore,
        test_utils::{parse_html_fragment, test_tracker_state},
        transaction::{TransactionType, form::TransactionDraft},
    };

    use super::{create_transaction_endpoint, get_entry_form_endpoint};

    fn draft(description: &str, amount: &str, category: &str) -> TransactionDraft {
        TransactionDraft {
            description: description.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            transaction_type: TransactionType::Expense,
        }
    }

    fn attr_of(html: &Html, selector: &str, attribute: &str) -> Option<String> {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .and_then(|element| element.value().attr(attribute))
            .map(str::to_owned)
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = test_tracker_state(MemoryKeyValueStore::default());

        let response = create_transaction_endpoint(
            State(state.clone()),
            Form(draft("Coffee", "5", "Food")),
        )
        .await
        .into_response();

        {
            let tracker = state.lock().unwrap();
            assert_eq!(tracker.transactions().len(), 5);
            assert_eq!(tracker.transactions()[0].description, "Coffee");
            assert_eq!(tracker.statistics().total_expense, 2705.0);
        }

        let html = parse_html_fragment(response).await;
        assert_eq!(attr_of(&html, "#statistics", "hx-swap-oob").as_deref(), Some("true"));
        assert_eq!(
            attr_of(&html, "#transaction-list", "hx-swap-oob").as_deref(),
            Some("true")
        );
        assert_eq!(attr_of(&html, "#transaction-form", "hx-swap-oob"), None);
        assert_eq!(
            attr_of(&html, "input[name=description]", "value").as_deref(),
            Some("")
        );
        assert_eq!(
            attr_of(&html, "[autofocus]", "name").as_deref(),
            Some("description")
        );
        assert!(html.select(&Selector::parse("dialog").unwrap()).next().is_none());
    }

    #[tokio::test]
    async fn rejected_draft_shows_dialog_and_keeps_values() {
        let state = test_tracker_state(MemoryKeyValueStore::default());

        let response = create_transaction_endpoint(
            State(state.clone()),
            Form(draft("Coffee", "0", "Food")),
        )
        .await
        .into_response();

        assert_eq!(state.lock().unwrap().transactions().len(), 4);

        let html = parse_html_fragment(response).await;
        let message = html
            .select(&Selector::parse("dialog[open] .dialog-message").unwrap())
            .next()
            .expect("no validation dialog");
        assert_eq!(
            message.text().collect::<String>(),
            "Amount must be greater than 0"
        );
        assert_eq!(
            attr_of(&html, "input[name=description]", "value").as_deref(),
            Some("Coffee")
        );
        assert_eq!(attr_of(&html, "[autofocus]", "name").as_deref(), Some("amount"));
        assert!(html.select(&Selector::parse("#statistics").unwrap()).next().is_none());
    }

    #[tokio::test]
    async fn missing_fields_focus_description() {
        let state = test_tracker_state(MemoryKeyValueStore::default());

        let response =
            create_transaction_endpoint(State(state.clone()), Form(draft("", "", "")))
                .await
                .into_response();

        let html = parse_html_fragment(response).await;
        let message = html
            .select(&Selector::parse(".dialog-message").unwrap())
            .next()
            .expect("no validation dialog");
        assert_eq!(message.text().collect::<String>(), "Please fill in all fields");
        assert_eq!(
            attr_of(&html, "[autofocus]", "name").as_deref(),
            Some("description")
        );
    }

    #[tokio::test]
    async fn type_change_swaps_categories() {
        let state = test_tracker_state(MemoryKeyValueStore::default());

        let response = get_entry_form_endpoint(
            State(state),
            Query(TransactionDraft {
                transaction_type: TransactionType::Income,
                ..draft("Pay day", "100", "Food")
            }),
        )
        .await
        .into_response();

        let html = parse_html_fragment(response).await;
        let categories: Vec<_> = html
            .select(&Selector::parse("select[name=category] option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .map(str::to_owned)
            .collect();
        assert_eq!(
            categories,
            ["", "Salary", "Freelance", "Business", "Investment", "Other"]
        );
        assert_eq!(
            attr_of(&html, "select[name=category] option[selected]", "value"),
            None
        );
        assert_eq!(
            attr_of(&html, "input[name=description]", "value").as_deref(),
            Some("Pay day")
        );
        assert_eq!(
            attr_of(&html, "select[name=type] option[selected]", "value").as_deref(),
            Some("income")
        );
    }
}
