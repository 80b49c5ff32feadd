//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{
    Error,
    clock::Clock,
    store::TransactionStore,
    table::TransactionTable,
    timezone::get_local_offset,
    transaction::TransactionForm,
};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The list of transactions shown on the page.
    pub store: Arc<TransactionStore>,

    /// The new transaction form.
    pub form: Arc<Mutex<TransactionForm>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with an empty store backed by `table`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        table: Arc<dyn TransactionTable>,
        clock: Arc<dyn Clock>,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            store: Arc::new(TransactionStore::new(table, clock)),
            form: Arc::new(Mutex::new(TransactionForm::default())),
            local_timezone: local_timezone.to_owned(),
        })
    }
}

impl FromRef<AppState> for Arc<TransactionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::AppState;
    use crate::{Error, clock::SystemClock, test_utils::FakeTransactionTable};

    #[test]
    fn rejects_unknown_timezone() {
        let result = AppState::new(
            Arc::new(FakeTransactionTable::default()),
            Arc::new(SystemClock),
            "Not/A_Timezone",
        );

        assert!(
            matches!(result, Err(Error::InvalidTimezoneError(ref tz)) if tz == "Not/A_Timezone")
        );
    }
}
