//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    page::{
        create_transaction_endpoint, dismiss_alert_endpoint, get_index_page,
        refresh_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::REFRESH_TRANSACTIONS,
            post(refresh_transactions_endpoint),
        )
        .route(endpoints::ALERT, delete(dismiss_alert_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}
