//! Shared HTML building blocks and class names.

use maud::{DOCTYPE, Markup, html};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "btn btn-primary";
pub const BUTTON_DELETE_STYLE: &str = "btn btn-danger";
pub const BUTTON_FILTER_STYLE: &str = "filter-btn";
pub const BUTTON_FILTER_ACTIVE_STYLE: &str = "filter-btn active";

// Form styles
pub const FORM_LABEL_STYLE: &str = "form-label";
pub const FORM_TEXT_INPUT_STYLE: &str = "form-input";
pub const FORM_SELECT_STYLE: &str = "form-select";

// Page container
pub const PAGE_CONTAINER_STYLE: &str = "container";

/// Whether a fragment replaces the element htmx targeted or is swapped
/// out-of-band into the element with the same ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapMode {
    /// Replace the element the request targeted.
    Target,
    /// Replace the element with the same ID wherever it is on the page.
    OutOfBand,
}

impl SwapMode {
    /// The value for the `hx-swap-oob` attribute, if any.
    pub fn hx_swap_oob(self) -> Option<&'static str> {
        match self {
            SwapMode::Target => None,
            SwapMode::OutOfBand => Some("true"),
        }
    }
}

/// The page skeleton: stylesheet, htmx scripts and the alert container around `content`.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }
                link href="/static/main.css" rel="stylesheet";

                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}
            }

            body
                hx-ext="response-targets"
                class="app"
            {
                (content)

                // Alert container for error responses
                div
                    id="alert-container"
                    class="alert-container"
                {}
            }
        }
    }
}

/// A full-page error message with a hint for how to fix it.
pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="error-page"
        {
            h1 class="error-code" { (header) }
            p class="error-description" { (description) }
            p class="error-fix" { (fix) }

            a href="/" class=(BUTTON_PRIMARY_STYLE)
            {
                "Back to Homepage"
            }
        }
    );

    base(title, &content)
}

/// An animated spinner.
pub fn loading_spinner() -> Markup {
    html! {
        div class="spinner" role="status" aria-hidden="true" {}
    }
}
