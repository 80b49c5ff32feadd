//! Validation of raw user input into a well-typed request for a new transaction.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::transaction::core::{NewTransaction, TransactionType};

/// The largest amount a single transaction may have, one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Unvalidated user input for a new transaction.
///
/// The default draft is an expense with an empty description and amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The amount exactly as the user typed it.
    #[serde(default)]
    pub amount: String,
    /// Whether the money was spent or earned.
    #[serde(default)]
    pub type_: TransactionType,
}

/// A request for a new transaction that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTransaction {
    /// The trimmed, non-empty description.
    pub description: String,
    /// The parsed, non-negative amount.
    pub amount: Decimal,
    /// Whether the money was spent or earned.
    pub type_: TransactionType,
}

impl ValidatedTransaction {
    /// Stamp the request with the moment it was submitted.
    pub fn submitted_at(self, created_at: OffsetDateTime) -> NewTransaction {
        NewTransaction {
            created_at,
            description: self.description,
            amount: self.amount,
            type_: self.type_,
        }
    }
}

/// The reasons a [TransactionDraft] can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The description was empty or only contained whitespace.
    #[error("Please enter a description for the transaction.")]
    EmptyDescription,

    /// The amount was not a non-negative decimal number.
    #[error("\"{0}\" is not a valid amount. Please enter a positive number, e.g. 4.50.")]
    InvalidAmount(String),

    /// The amount was larger than [MAX_AMOUNT].
    #[error("\"{0}\" is too large. Amounts can be at most 1,000,000,000,000.")]
    AmountTooLarge(String),
}

/// Check `draft` and convert it into a [ValidatedTransaction].
///
/// The draft itself is left untouched, it is up to the caller to decide
/// whether to reset it.
///
/// # Errors
/// Returns:
/// - [ValidationError::EmptyDescription] if the description is blank,
/// - [ValidationError::InvalidAmount] if the amount does not parse as a non-negative number,
/// - or [ValidationError::AmountTooLarge] if the amount is over [MAX_AMOUNT].
pub fn validate(draft: &TransactionDraft) -> Result<ValidatedTransaction, ValidationError> {
    let description = draft.description.trim();

    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let amount = parse_amount(&draft.amount)?;

    Ok(ValidatedTransaction {
        description: description.to_owned(),
        amount,
        type_: draft.type_,
    })
}

fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();

    match Decimal::from_str(trimmed) {
        Ok(amount) if amount.is_sign_negative() && !amount.is_zero() => {
            Err(ValidationError::InvalidAmount(text.to_owned()))
        }
        Ok(amount) if amount > MAX_AMOUNT => Err(ValidationError::AmountTooLarge(text.to_owned())),
        // "-0" parses with the sign bit set, store it as a plain zero.
        Ok(amount) => Ok(amount.abs()),
        Err(_) => Err(ValidationError::InvalidAmount(text.to_owned())),
    }
}
