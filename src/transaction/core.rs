//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type the transaction table uses for row IDs.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. groceries.
    #[default]
    Expense,
}

impl TransactionType {
    /// The literal used for this type in the transaction table.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A string that is neither "income" nor "expense" was read as a [TransactionType].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type, expected \"income\" or \"expense\"")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(UnknownTransactionType(other.to_owned())),
        }
    }
}

/// An expense or income that has been saved to the transaction table.
///
/// Transactions are never modified after they are created. The `id` is always
/// assigned by the table, never by this application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the transaction table assigned to this transaction.
    pub id: TransactionId,
    /// When the transaction was submitted. Transactions are sorted by this field.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The non-negative amount of money that was spent or earned.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

/// A transaction that has not been assigned an ID yet.
///
/// This is the record that is sent to the transaction table on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// When the transaction was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The non-negative amount of money that was spent or earned.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Whether the money was spent or earned.
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

impl NewTransaction {
    /// Attach the table assigned `id` to create the stored [Transaction].
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            created_at: self.created_at,
            description: self.description,
            amount: self.amount,
            type_: self.type_,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
