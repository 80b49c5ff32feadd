//! Fintrack is a web app for recording income and expenses.
//!
//! This library keeps an in-memory, newest-first list of transactions in sync
//! with a transaction table (a PostgREST-style REST API or a local SQLite
//! file), derives the income, expense and balance totals from it, and serves
//! a single HTML page for adding and reviewing transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod clock;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod not_found;
mod page;
mod routing;
mod store;
mod table;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{Summary, aggregate};
pub use error::Error;
pub use routing::build_router;
pub use store::{StoreSnapshot, TransactionStore};
pub use table::{
    RestTransactionTable, SQLiteTransactionTable, SortDirection, TableError, TransactionTable,
    create_transaction_table,
};
pub use transaction::{
    NewTransaction, SubmissionState, Transaction, TransactionDraft, TransactionForm,
    TransactionId, TransactionType, UnknownTransactionType, ValidatedTransaction, ValidationError,
    submit, validate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
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
