//! A [TransactionTable] kept in a local SQLite database.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    table::{SortDirection, TableError, TransactionTable},
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// Timestamps are stored in UTC with a fixed width so that sorting the text
/// column sorts the rows chronologically.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// Stores transactions in the `"transaction"` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionTable {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionTable {
    /// Wrap `connection`, creating the transaction table if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the database lock cannot be acquired or the table cannot be created.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Result<Self, TableError> {
        {
            let connection = connection.lock().map_err(|_| TableError::DatabaseLock)?;
            create_transaction_table(&connection)?;
        }

        Ok(Self { connection })
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                description TEXT NOT NULL,
                amount TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense'))
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);",
        (),
    )?;

    Ok(())
}

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, TableError> {
    timestamp
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|error| TableError::Decode(error.to_string()))
}

fn conversion_error<E>(column: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;

    let created_at: String = row.get(1)?;
    let created_at = PrimitiveDateTime::parse(&created_at, TIMESTAMP_FORMAT)
        .map_err(|error| conversion_error(1, error))?
        .assume_utc();

    let description = row.get(2)?;

    let amount: String = row.get(3)?;
    let amount = Decimal::from_str(&amount)
        .map_err(|error| conversion_error(3, error))?;

    let type_: String = row.get(4)?;
    let type_ = TransactionType::from_str(&type_)
        .map_err(|error| conversion_error(4, error))?;

    Ok(Transaction {
        id,
        created_at,
        description,
        amount,
        type_,
    })
}

#[async_trait]
impl TransactionTable for SQLiteTransactionTable {
    async fn list_transactions(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<Transaction>, TableError> {
        let query = match direction {
            SortDirection::Ascending => {
                "SELECT id, created_at, description, amount, type FROM \"transaction\"
                 ORDER BY created_at ASC, id ASC"
            }
            SortDirection::Descending => {
                "SELECT id, created_at, description, amount, type FROM \"transaction\"
                 ORDER BY created_at DESC, id DESC"
            }
        };

        let connection = self
            .connection
            .lock()
            .map_err(|_| TableError::DatabaseLock)?;

        let transactions = connection
            .prepare(query)?
            .query_map([], map_transaction_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    async fn insert_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TableError> {
        let created_at = format_timestamp(transaction.created_at)?;

        let connection = self
            .connection
            .lock()
            .map_err(|_| TableError::DatabaseLock)?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (created_at, description, amount, type)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, created_at, description, amount, type",
            )?
            .query_row(
                (
                    created_at,
                    transaction.description,
                    transaction.amount.to_string(),
                    transaction.type_.as_str(),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }
}
