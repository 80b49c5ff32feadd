//! The banner used to tell the user that an operation failed.

use axum::response::Html;
use maud::{Markup, html};

use crate::endpoints;

/// An error message to show in the banner at the top of the page.
///
/// Only one banner is shown at a time, a new alert replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// The headline.
    pub message: String,
    /// Extra context shown under the headline, e.g. how to fix the problem.
    pub details: String,
}

impl Alert {
    /// Render the banner.
    ///
    /// The dismiss button asks the server to clear the stored error and
    /// removes the banner from the page.
    pub fn into_markup(self) -> Markup {
        let Alert { message, details } = self;

        html! {
            div
                id="alert"
                role="alert"
                class="flex items-start gap-3 border-l-4 border-red-500 bg-red-50 \
                    p-4 mb-6 rounded-r-lg text-red-700 dark:bg-gray-800 dark:text-red-400"
            {
                span class="shrink-0" { "⚠️" }

                div class="grow"
                {
                    p class="text-sm font-semibold" { (message) }

                    @if !details.is_empty()
                    {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    hx-delete=(endpoints::ALERT)
                    hx-target="#alert"
                    hx-swap="outerHTML"
                    class="shrink-0 text-sm font-medium hover:underline"
                {
                    "Dismiss"
                }
            }
        }
    }

    /// Render the banner as a standalone HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
