//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    currency::select_currency_endpoint,
    endpoints,
    home_page::{get_home_page, get_transaction_list_endpoint},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_entry_form_endpoint,
        select_filter_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transaction_list_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTION_FORM, get(get_entry_form_endpoint))
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::FILTER_API, post(select_filter_endpoint))
        .route(endpoints::CURRENCY_API, post(select_currency_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, MemoryKeyValueStore, endpoints, endpoints::format_endpoint};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(MemoryKeyValueStore::default(), "Etc/UTC").unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn serves_home_page() {
        let server = get_test_server();

        server.get(endpoints::ROOT).await.assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let server = get_test_server();

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn filter_form_deserialises() {
        let server = get_test_server();

        server
            .post(endpoints::FILTER_API)
            .form(&[("filter", "income")])
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn currency_form_deserialises() {
        let server = get_test_server();

        server
            .post(endpoints::CURRENCY_API)
            .form(&[("currency", "USD")])
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn entry_form_deserialises() {
        let server = get_test_server();
        let form = [
            ("type", "expense"),
            ("description", "Coffee"),
            ("amount", "5"),
            ("category", "Food"),
        ];

        let response = server.post(endpoints::TRANSACTIONS_API).form(&form).await;

        // Still loading, so only the statistics panel shows the new expense.
        response.assert_status_ok();
        assert!(response.text().contains("₹5.00"));
    }

    #[tokio::test]
    async fn entry_form_fragment_accepts_query() {
        let server = get_test_server();

        server
            .get(endpoints::TRANSACTION_FORM)
            .add_query_param("type", "income")
            .add_query_param("description", "")
            .add_query_param("amount", "")
            .add_query_param("category", "")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = get_test_server();

        server
            .delete(&format_endpoint(endpoints::DELETE_TRANSACTION, 42))
            .add_query_param("confirmed", true)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
