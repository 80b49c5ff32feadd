//! The lifecycle of submitting the new transaction form.
//!
//! ```text
//! Idle -> Validating -> Rejected (back to Idle, draft kept)
//!                    -> Submitting -> Succeeded (draft reset)
//!                                  -> Failed (back to Idle, draft kept)
//! ```
//!
//! Only one submission can be in flight per form. The form is guarded by a
//! plain mutex that is never held across the call to the store.

use std::sync::{Mutex, MutexGuard};

use crate::{
    Error,
    store::TransactionStore,
    transaction::{Transaction, TransactionDraft, ValidatedTransaction, validate},
};

/// Where the form is in the submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for the user to submit.
    #[default]
    Idle,
    /// Checking the draft.
    Validating,
    /// Waiting for the transaction table to save the transaction.
    Submitting,
}

/// The new transaction form: the user's draft and the submission state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    /// What the user has typed so far.
    pub draft: TransactionDraft,
    state: SubmissionState,
}

impl TransactionForm {
    /// The current submission state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Whether the submit button should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Replace the draft with the latest user input.
    ///
    /// Ignored while a submission is in flight so the values being saved and
    /// the values on screen do not diverge.
    pub fn update(&mut self, draft: TransactionDraft) {
        if !self.is_submitting() {
            self.draft = draft;
        }
    }

    /// Validate the draft and move to [SubmissionState::Submitting].
    ///
    /// # Errors
    /// Returns [Error::SubmissionInProgress] if the previous submission has
    /// not finished yet, or [Error::Validation] if the draft is rejected. A
    /// rejected draft is kept and the form goes back to
    /// [SubmissionState::Idle].
    pub fn begin(&mut self) -> Result<ValidatedTransaction, Error> {
        if self.is_submitting() {
            return Err(Error::SubmissionInProgress);
        }

        self.state = SubmissionState::Validating;

        match validate(&self.draft) {
            Ok(request) => {
                self.state = SubmissionState::Submitting;
                Ok(request)
            }
            Err(error) => {
                tracing::debug!("Rejected transaction draft: {error}");
                self.state = SubmissionState::Idle;
                Err(error.into())
            }
        }
    }

    /// Take `draft` as the latest user input and start submitting it.
    ///
    /// Both steps happen under the same borrow, so the draft that is
    /// validated is always the one passed in. While a submission is in
    /// flight `draft` is dropped and [Error::SubmissionInProgress] is
    /// returned.
    ///
    /// # Errors
    /// See [TransactionForm::begin].
    pub fn begin_with(&mut self, draft: TransactionDraft) -> Result<ValidatedTransaction, Error> {
        if self.is_submitting() {
            return Err(Error::SubmissionInProgress);
        }

        self.draft = draft;
        self.begin()
    }

    /// Record the outcome of the submission started by [TransactionForm::begin].
    ///
    /// The draft is reset only if the transaction was saved.
    pub fn finish(&mut self, outcome: &Result<Transaction, Error>) {
        if outcome.is_ok() {
            self.draft = TransactionDraft::default();
        }

        self.state = SubmissionState::Idle;
    }
}

/// Put `draft` into `form` and submit it to `store`.
///
/// # Errors
/// Returns the error from [TransactionForm::begin_with] or
/// [TransactionStore::add], or [Error::FormLockError] if the form lock is
/// poisoned.
pub async fn submit(
    form: &Mutex<TransactionForm>,
    draft: TransactionDraft,
    store: &TransactionStore,
) -> Result<Transaction, Error> {
    let request = lock_form(form)?.begin_with(draft)?;

    let outcome = store.add(request).await;
    lock_form(form)?.finish(&outcome);

    outcome
}

fn lock_form(form: &Mutex<TransactionForm>) -> Result<MutexGuard<'_, TransactionForm>, Error> {
    form.lock().map_err(|error| {
        tracing::error!("could not acquire form lock: {error}");
        Error::FormLockError
    })
}
