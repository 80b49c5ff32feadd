//! The contract for the remote table where transactions are persisted.
//!
//! The application never assigns transaction IDs or sorts rows itself when
//! loading, both are the responsibility of the [TransactionTable]
//! implementation.

mod rest;
mod sqlite;

use async_trait::async_trait;

pub use rest::RestTransactionTable;
pub use sqlite::{SQLiteTransactionTable, create_transaction_table};

use crate::transaction::{NewTransaction, Transaction};

/// The order in which to list transactions by their creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

/// The errors a [TransactionTable] may return.
///
/// These are only intended for logging, the store replaces them with a
/// message suitable for the user.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The request could not be sent or the response could not be read.
    #[error("could not reach the transaction table: {0}")]
    Http(#[from] reqwest::Error),

    /// The table responded with a non-success status code.
    #[error("the transaction table responded with status {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, usually a JSON error object.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("could not decode the response from the transaction table: {0}")]
    Decode(String),

    /// An insert returned zero or more than one row.
    #[error("expected the insert to return exactly one row, got {0}")]
    UnexpectedRowCount(usize),

    /// The access key cannot be sent as an HTTP header.
    #[error("the access key contains characters that are not allowed in an HTTP header")]
    InvalidAccessKey,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,
}

/// A table of transactions kept by an external data store.
#[async_trait]
pub trait TransactionTable: Send + Sync {
    /// Get every transaction, ordered by creation time in `direction`.
    async fn list_transactions(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<Transaction>, TableError>;

    /// Save `transaction` and return the stored row, including its new ID.
    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TableError>;
}
