//! Alert messages rendered into the page's alert container.
//!
//! Form endpoints point HTMX at `#alert-container` (via `hx-target` or
//! `hx-target-error`), so returning one of these as the response body shows
//! the user a transient notice without leaving the page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A notice shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded.
    Success {
        /// Short headline, e.g. "Password updated".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
    /// The action failed.
    Error {
        /// Short headline, e.g. "Insufficient balance".
        message: String,
        /// Supporting detail shown under the headline.
        details: String,
    },
    /// The action failed and a headline is all there is to say.
    ErrorSimple {
        /// Short headline.
        message: String,
    },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details, accent_style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "text-green-800 border-green-300 bg-green-50 dark:text-green-400
                dark:border-green-800",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 border-red-300 bg-red-50 dark:text-red-400 dark:border-red-800",
            ),
            Alert::ErrorSimple { message } => (
                message,
                String::new(),
                "text-red-800 border-red-300 bg-red-50 dark:text-red-400 dark:border-red-800",
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                role="alert"
                class=(format!(
                    "flex items-start gap-3 p-4 mb-4 border rounded-lg dark:bg-gray-800 {accent_style}"
                ))
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-semibold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
