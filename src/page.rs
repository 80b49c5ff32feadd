//! The single page of the app and the endpoints that re-render it.
//!
//! Every handler that changes something responds with the whole `#app`
//! element so the summary cards, the banner, the form and the history can
//! never disagree with each other.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{Html, IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    AppState, Error,
    alert::Alert,
    dashboard::{aggregate, summary_cards_view},
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base},
    store::{StoreSnapshot, TransactionStore},
    timezone::get_local_offset,
    transaction::{
        TransactionDraft, TransactionForm, submit, transaction_form_view,
        transaction_history_view,
    },
};

/// The state needed to render the page and handle the form.
#[derive(Clone)]
pub struct PageState {
    /// The list of transactions shown on the page.
    pub store: Arc<TransactionStore>,
    /// The new transaction form.
    pub form: Arc<Mutex<TransactionForm>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for PageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            form: state.form.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl PageState {
    fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }

    fn form(&self) -> Result<TransactionForm, Error> {
        self.form.lock().map(|form| form.clone()).map_err(|error| {
            tracing::error!("could not acquire form lock: {error}");
            Error::FormLockError
        })
    }

    /// Render `#app` from the current state.
    ///
    /// `alert` takes the place of the store's error, if any.
    fn render_app(&self, alert: Option<Alert>) -> Result<Markup, Error> {
        let local_offset = self.local_offset()?;
        let form = self.form()?;
        let snapshot = self.store.snapshot();

        Ok(app_view(&snapshot, &form, alert, local_offset))
    }
}

/// Display the page.
///
/// Requests made by htmx, e.g. polling while the first load is in flight,
/// only get the `#app` element.
pub async fn get_index_page(
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<PageState>,
) -> Response {
    if is_htmx_request {
        return render_fragment(&state, None);
    }

    match state.render_app(None) {
        Ok(app) => Html(base("Dashboard", &app).into_string()).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for creating a new transaction, re-renders `#app`.
///
/// Failures are shown in the banner, so the response is a normal page
/// fragment unless something unexpected went wrong.
pub async fn create_transaction_endpoint(
    State(state): State<PageState>,
    Form(draft): Form<TransactionDraft>,
) -> Response {
    // Run the submission in its own task so that it finishes even if the
    // client goes away.
    let task = tokio::spawn({
        let store = state.store.clone();
        let form = state.form.clone();
        async move { submit(&form, draft, &store).await }
    });

    let alert = match task.await.map_err(Error::from) {
        Ok(Ok(_)) => None,
        // The store keeps the error for the banner.
        Ok(Err(Error::SubmitFailed(_))) => None,
        Ok(Err(error @ (Error::Validation(_) | Error::SubmissionInProgress))) => {
            state.store.dismiss_error();
            Some(error.to_alert())
        }
        Ok(Err(error)) | Err(error) => return error.into_alert_response(),
    };

    render_fragment(&state, alert)
}

/// A route handler for reloading the transactions, re-renders `#app`.
pub async fn refresh_transactions_endpoint(State(state): State<PageState>) -> Response {
    let task = tokio::spawn({
        let store = state.store.clone();
        async move { store.load().await }
    });

    match task.await.map_err(Error::from) {
        // A failed load is reported through the store's error.
        Ok(Ok(_)) | Ok(Err(Error::LoadFailed(_))) => {}
        Ok(Err(error)) | Err(error) => return error.into_alert_response(),
    }

    render_fragment(&state, None)
}

/// A route handler for dismissing the error banner.
///
/// Responds with an empty body which replaces the banner.
pub async fn dismiss_alert_endpoint(
    State(store): State<Arc<TransactionStore>>,
) -> Html<&'static str> {
    store.dismiss_error();

    Html("")
}

fn render_fragment(state: &PageState, alert: Option<Alert>) -> Response {
    match state.render_app(alert) {
        Ok(app) => Html(app.into_string()).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn app_view(
    snapshot: &StoreSnapshot,
    form: &TransactionForm,
    alert: Option<Alert>,
    local_offset: UtcOffset,
) -> Markup {
    let summary = aggregate(&snapshot.transactions);
    let show_skeleton = snapshot.is_loading && snapshot.transactions.is_empty();
    let alert = alert.or_else(|| {
        snapshot.error.as_ref().map(|message| Alert {
            message: message.clone(),
            details: String::new(),
        })
    });

    html! {
        div
            id="app"
            class=(PAGE_CONTAINER_STYLE)
            // Poll until the first load finishes.
            hx-get=[snapshot.is_loading.then_some(endpoints::ROOT)]
            hx-trigger=[snapshot.is_loading.then_some("load delay:500ms")]
            hx-swap=[snapshot.is_loading.then_some("outerHTML")]
        {
            header class="flex items-center justify-between mb-6"
            {
                h1 class="text-2xl font-bold text-gray-900 dark:text-white"
                {
                    "Financial Tracker"
                }

                button
                    type="button"
                    hx-post=(endpoints::REFRESH_TRANSACTIONS)
                    hx-target="#app"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Refresh"
                }
            }

            @if let Some(alert) = alert {
                (alert.into_markup())
            }

            (summary_cards_view(&summary, show_skeleton))

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 mt-6"
            {
                div class="lg:col-span-1"
                {
                    (transaction_form_view(form))
                }

                div class="lg:col-span-2"
                {
                    (transaction_history_view(&snapshot.transactions, local_offset))
                }
            }
        }
    }
}
