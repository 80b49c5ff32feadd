//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, transaction::ValidationError,
};

/// The errors that may occur in the application.
///
/// Failures reported by the transaction table are not passed through, they
/// are logged and replaced with [Error::LoadFailed] or [Error::SubmitFailed].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transactions could not be fetched from the transaction table.
    ///
    /// The string holds the underlying cause for logging, it should not be
    /// shown to the user.
    #[error("Failed to load transactions. Please check your connection.")]
    LoadFailed(String),

    /// A new transaction could not be saved to the transaction table.
    ///
    /// The string holds the underlying cause for logging, it should not be
    /// shown to the user.
    #[error("Failed to add transaction. Please try again.")]
    SubmitFailed(String),

    /// The user input for a new transaction was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A transaction was submitted while the previous one was still being saved.
    #[error("A transaction is already being saved. Please wait for it to finish.")]
    SubmissionInProgress,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the transaction form.
    #[error("could not acquire the form lock")]
    FormLockError,

    /// The task running a store operation panicked.
    #[error("the background task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        tracing::error!("a background task failed: {value}");
        Error::TaskFailed(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// The banner to show the user for this error.
    pub fn to_alert(&self) -> Alert {
        let message = match self {
            Error::LoadFailed(_) => "Could not load transactions",
            Error::SubmitFailed(_) => "Could not add transaction",
            Error::Validation(_) => "Invalid transaction",
            Error::SubmissionInProgress => "Please wait",
            Error::InvalidTimezoneError(_) => "Invalid Timezone Settings",
            Error::FormLockError | Error::TaskFailed(_) => "Something went wrong",
        };

        let details = match self {
            Error::FormLockError | Error::TaskFailed(_) => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        Alert {
            message: message.to_owned(),
            details,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::SubmissionInProgress => StatusCode::CONFLICT,
            Error::LoadFailed(_) | Error::SubmitFailed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, self.to_alert().into_html()).into_response()
    }
}
