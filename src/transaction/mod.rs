//! Transactions and the form used to record them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` record and the `NewTransaction` sent to the transaction table
//! - Validation of the user's draft and the submission lifecycle
//! - The views for the new transaction form and the transaction history

mod core;
mod draft;
mod form;
mod list;
mod submission;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, UnknownTransactionType,
};
pub use draft::{MAX_AMOUNT, TransactionDraft, ValidatedTransaction, ValidationError, validate};
pub use form::transaction_form_view;
pub use list::transaction_history_view;
pub use submission::{SubmissionState, TransactionForm, submit};
