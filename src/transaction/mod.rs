//! Transactions and the components that create, show and delete them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its categories
//! - The entry form and its validation
//! - The transaction list, its filter, and the individual items
//! - The route handlers for creating, deleting and filtering transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod item;
mod list;

pub use core::{
    Category, FALLBACK_CATEGORY_ICON, NewTransaction, Transaction, TransactionId,
    TransactionType,
};
pub use create_endpoint::{create_transaction_endpoint, get_entry_form_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::{
    EntryForm, FormError, FormField, TransactionDraft, amount_symbol_view, entry_form_view,
};
pub use list::{Filter, filter_transactions, select_filter_endpoint, transaction_list_view};
