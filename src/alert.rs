//! Alert messages that htmx swaps into the page's alert container.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error with a headline and a longer explanation.
    Error { message: String, details: String },
    /// An error that only needs a headline.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert.
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div
                class="alert alert-error"
                role="alert"
            {
                div class="alert-body"
                {
                    p class="alert-message" { (message) }

                    @if let Some(details) = details {
                        p class="alert-details" { (details) }
                    }
                }

                button
                    type="button"
                    class="alert-dismiss"
                    aria-label="Dismiss"
                    onclick="this.closest('.alert').remove()"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
