//! The filterable list of transactions.

use std::sync::OnceLock;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use numfmt::{Formatter, Precision};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::TrackerState,
    currency::Currency,
    endpoints,
    home_page::transaction_list_section,
    html::{BUTTON_FILTER_ACTIVE_STYLE, BUTTON_FILTER_STYLE, SwapMode},
    transaction::{
        core::{Transaction, TransactionType},
        item::transaction_item_view,
    },
};

/// Which transactions the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show every transaction.
    #[default]
    All,
    /// Show income only.
    Income,
    /// Show expenses only.
    Expense,
}

impl Filter {
    /// Every filter, in the order the buttons are shown.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Income, Filter::Expense];

    /// Whether transactions of `transaction_type` pass this filter.
    pub fn matches(self, transaction_type: TransactionType) -> bool {
        match self {
            Filter::All => true,
            Filter::Income => transaction_type == TransactionType::Income,
            Filter::Expense => transaction_type == TransactionType::Expense,
        }
    }

    /// The value sent when the filter is selected, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Income => "income",
            Filter::Expense => "expense",
        }
    }

    /// The button label.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Income => "Income",
            Filter::Expense => "Expenses",
        }
    }

    /// What to show when no transactions match the filter.
    pub fn empty_message(self) -> String {
        match self {
            Filter::All => "No transactions yet. Add your first transaction above!".to_owned(),
            filter => format!("No {} transactions found.", filter.as_str()),
        }
    }
}

/// The transactions in `transactions` that match `filter`, in their original order.
pub fn filter_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    filter: Filter,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .into_iter()
        .filter(move |transaction| filter.matches(transaction.transaction_type))
}

/// The form data for selecting a filter.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// The transactions to show.
    pub filter: Filter,
}

/// A route handler for selecting which transactions the list shows.
pub async fn select_filter_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<FilterForm>,
) -> Response {
    let mut tracker = match state.lock() {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    tracker.set_filter(form.filter);
    tracing::debug!("showing {} transactions", form.filter.as_str());

    transaction_list_section(&tracker, SwapMode::Target).into_response()
}

fn get_count_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap_or_else(|_| Formatter::new())
            .precision(Precision::Decimals(0))
    })
}

/// Renders the filter buttons and the already filtered `transactions`.
pub fn transaction_list_view(
    transactions: &[&Transaction],
    filter: Filter,
    currency: Currency,
) -> Markup {
    let count = get_count_formatter().fmt_string(transactions.len());

    html! {
        div class="list-header"
        {
            h2 class="card-title"
            {
                "Transactions "
                span class="transaction-count" { "(" (count) ")" }
            }

            div class="filter-buttons" role="group" aria-label="Filter transactions"
            {
                @for option in Filter::ALL {
                    @let active = option == filter;
                    @let style = if active { BUTTON_FILTER_ACTIVE_STYLE } else { BUTTON_FILTER_STYLE };
                    button
                        type="button"
                        class=(style)
                        aria-pressed=(if active { "true" } else { "false" })
                        hx-post=(endpoints::FILTER_API)
                        hx-vals=(serde_json::json!({ "filter": option.as_str() }).to_string())
                        hx-target="#transaction-list"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                    {
                        (option.label())
                    }
                }
            }
        }

        @if transactions.is_empty() {
            p class="empty-state" { (filter.empty_message()) }
        } @else {
            ul class="transactions"
            {
                @for transaction in transactions {
                    (transaction_item_view(transaction, currency))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, response::IntoResponse};
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        MemoryKeyValueStore,
        currency::Currency,
        data_source::seed_transactions,
        test_utils::{parse_html_fragment, test_tracker_state},
        transaction::core::{Transaction, TransactionType},
    };

    use super::{
        Filter, FilterForm, filter_transactions, select_filter_endpoint, transaction_list_view,
    };

    fn descriptions(html: &Html) -> Vec<String> {
        html.select(&Selector::parse(".transaction-description").unwrap())
            .map(|element| element.text().collect::<String>())
            .collect()
    }

    fn render(transactions: &[&Transaction], filter: Filter) -> Html {
        Html::parse_fragment(
            &transaction_list_view(transactions, filter, Currency::Inr).into_string(),
        )
    }

    #[test]
    fn filter_matches_types() {
        assert!(Filter::All.matches(TransactionType::Income));
        assert!(Filter::All.matches(TransactionType::Expense));
        assert!(Filter::Income.matches(TransactionType::Income));
        assert!(!Filter::Income.matches(TransactionType::Expense));
        assert!(Filter::Expense.matches(TransactionType::Expense));
        assert!(!Filter::Expense.matches(TransactionType::Income));
    }

    #[test]
    fn filter_keeps_order() {
        let transactions = seed_transactions(date!(2026 - 10 - 19));

        let expenses: Vec<_> = filter_transactions(&transactions, Filter::Expense)
            .map(|transaction| transaction.description.as_str())
            .collect();

        assert_eq!(expenses, ["Grocery Shopping", "Electric Bill"]);
    }

    #[test]
    fn empty_messages() {
        assert_eq!(
            Filter::All.empty_message(),
            "No transactions yet. Add your first transaction above!"
        );
        assert_eq!(Filter::Income.empty_message(), "No income transactions found.");
        assert_eq!(Filter::Expense.empty_message(), "No expense transactions found.");
    }

    #[test]
    fn renders_transactions_in_order() {
        let transactions = seed_transactions(date!(2026 - 10 - 19));
        let transactions: Vec<_> = transactions.iter().collect();

        let html = render(&transactions, Filter::All);

        assert_eq!(
            descriptions(&html),
            ["Salary", "Grocery Shopping", "Freelance Project", "Electric Bill"]
        );
        let count = html
            .select(&Selector::parse(".transaction-count").unwrap())
            .next()
            .expect("no transaction count");
        assert_eq!(count.text().collect::<String>(), "(4)");
    }

    #[test]
    fn marks_active_filter() {
        let html = render(&[], Filter::Income);

        let active: Vec<_> = html
            .select(&Selector::parse(".filter-btn.active").unwrap())
            .map(|button| button.text().collect::<String>())
            .collect();
        let labels: Vec<_> = html
            .select(&Selector::parse(".filter-btn").unwrap())
            .map(|button| button.text().collect::<String>())
            .collect();

        assert_eq!(active, ["Income"]);
        assert_eq!(labels, ["All", "Income", "Expenses"]);
    }

    #[test]
    fn filter_buttons_post_choice() {
        let html = render(&[], Filter::All);

        let values: Vec<_> = html
            .select(&Selector::parse(".filter-btn").unwrap())
            .filter_map(|button| button.value().attr("hx-vals"))
            .map(str::to_owned)
            .collect();

        assert_eq!(
            values,
            [
                r#"{"filter":"all"}"#,
                r#"{"filter":"income"}"#,
                r#"{"filter":"expense"}"#
            ]
        );
    }

    #[test]
    fn renders_empty_state_for_filter() {
        let cases = [
            (Filter::All, "No transactions yet. Add your first transaction above!"),
            (Filter::Income, "No income transactions found."),
            (Filter::Expense, "No expense transactions found."),
        ];

        for (filter, want) in cases {
            let html = render(&[], filter);

            let message = html
                .select(&Selector::parse(".empty-state").unwrap())
                .next()
                .expect("no empty state");
            assert_eq!(message.text().collect::<String>(), want);
        }
    }

    #[tokio::test]
    async fn selecting_filter_shows_matching_transactions() {
        let state = test_tracker_state(MemoryKeyValueStore::default());

        let response = select_filter_endpoint(
            State(state.clone()),
            Form(FilterForm {
                filter: Filter::Income,
            }),
        )
        .await
        .into_response();

        assert_eq!(state.lock().unwrap().filter(), Filter::Income);
        let html = parse_html_fragment(response).await;
        assert_eq!(descriptions(&html), ["Salary", "Freelance Project"]);
        let list = html
            .select(&Selector::parse("#transaction-list").unwrap())
            .next()
            .expect("no transaction list");
        assert_eq!(list.value().attr("hx-swap-oob"), None);
    }
}
