//! Alerts for displaying success and error messages to users.
//!
//! Alerts replace the whole `#alert-container` element. Error responses are
//! swapped into the container via `hx-target-error`, while success alerts ride
//! along with a successful response as an out-of-band swap.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A message to display in the alert container.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Confirms that a change was saved.
    Success { message: String },
    /// An error message with details explaining how to fix the problem.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as a replacement for `#alert-container`.
    pub fn into_html(self) -> Markup {
        self.render(false)
    }

    /// Render the alert as an out-of-band swap of `#alert-container`.
    pub fn into_oob_html(self) -> Markup {
        self.render(true)
    }

    fn render(self, out_of_band: bool) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob=[out_of_band.then_some("true")]
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class=(container_style)
                {
                    div class="flex-1"
                    {
                        p class="font-semibold" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

const SUCCESS_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg shadow \
    text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "flex items-start gap-3 p-4 mb-4 rounded-lg shadow \
    text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400";

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_oob_html().into_response()
    }
}
