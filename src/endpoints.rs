//! Route paths for the page, the htmx fragments and static assets.

/// The single page of the app.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to get the transaction list or create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to get the entry form for a given transaction type.
pub const TRANSACTION_FORM: &str = "/api/transactions/form";
/// The route to delete a single transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to select which transactions the list shows.
pub const FILTER_API: &str = "/api/filter";
/// The route to select the display currency.
pub const CURRENCY_API: &str = "/api/currency";

/// Substitute `id` for the `{...}` placeholder in `endpoint_path`.
///
/// Paths without a placeholder are returned unchanged, e.g.
/// `format_endpoint(DELETE_TRANSACTION, 7)` gives "/api/transactions/7".
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some((prefix, rest)) = endpoint_path.split_once('{') else {
        return endpoint_path.to_owned();
    };

    let suffix = rest.split_once('}').map_or("", |(_, suffix)| suffix);

    format!("{prefix}{id}{suffix}")
}
