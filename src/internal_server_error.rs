//! The 500 page, and the htmx redirect to it for form posts that fail on the server.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{endpoints, html::error_view};

/// A 500 page that says what went wrong and what the user can do about it.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Your expenses are safe. Try again in a moment.",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

/// Send an htmx form post to the 500 page.
///
/// htmx does not follow a plain redirect for a failed request, so the
/// location goes in `HX-Redirect`.
pub(crate) fn get_internal_server_error_redirect() -> Response {
    let location = HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned());

    (StatusCode::INTERNAL_SERVER_ERROR, location, ()).into_response()
}
