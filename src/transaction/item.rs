//! A single row in the transaction list.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    currency::{Currency, format_currency},
    dialog::Dialogs,
    endpoints::{self, format_endpoint},
    html::BUTTON_DELETE_STYLE,
    transaction::core::{Transaction, TransactionId},
};

/// The max number of graphemes to display in a transaction's description
/// before truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Format `date` like "Oct 19, 2026".
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|error| {
        tracing::error!("could not format date {date}: {error}");
        date.to_string()
    })
}

/// The amount with a sign showing whether money came in or went out, e.g. "+₹50,000.00".
pub fn format_signed_amount(transaction: &Transaction, currency: Currency) -> String {
    let sign = if transaction.is_income() { '+' } else { '-' };

    format!("{sign}{}", format_currency(transaction.amount, currency))
}

/// Shorten long descriptions, returning the full description as well if it
/// was truncated so it can be shown in a tooltip.
pub fn truncate_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();
        (truncated + "...", Some(description))
    }
}

/// The question asked before deleting the transaction described by `description`.
pub fn delete_confirmation_message(description: &str) -> String {
    format!("Are you sure you want to delete \"{description}\"?")
}

/// Ask the user to confirm deleting `transaction`, returning its ID only if they agreed.
pub fn request_delete(
    transaction: &Transaction,
    dialogs: &mut dyn Dialogs,
) -> Option<TransactionId> {
    dialogs
        .confirm(&delete_confirmation_message(&transaction.description))
        .then_some(transaction.id)
}

/// Renders one transaction with its delete button.
pub fn transaction_item_view(transaction: &Transaction, currency: Currency) -> Markup {
    let (description, full_description) = truncate_description(&transaction.description);
    let type_class = transaction.transaction_type.as_str();
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let delete_values = serde_json::json!({ "confirmed": true }).to_string();

    html! {
        li
            id=(format!("transaction-{}", transaction.id))
            class={ "transaction-item " (type_class) }
        {
            div class="transaction-icon" { (transaction.category.icon()) }

            div class="transaction-details"
            {
                p class="transaction-description" title=[full_description] { (description) }

                p class="transaction-meta"
                {
                    span class="transaction-category" { (transaction.category.name()) }
                    " • "
                    time class="transaction-date" datetime=(transaction.date) {
                        (format_date(transaction.date))
                    }
                }
            }

            span class={ "transaction-amount " (type_class) }
            {
                (format_signed_amount(transaction, currency))
            }

            button
                type="button"
                class=(BUTTON_DELETE_STYLE)
                aria-label="Delete transaction"
                hx-delete=(delete_url)
                hx-confirm=(delete_confirmation_message(&transaction.description))
                hx-vals=(delete_values)
                hx-target="#transaction-list"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
            {
                "🗑️"
            }
        }
    }
}
