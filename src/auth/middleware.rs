//! Guards for the expense pages and the htmx endpoints behind them.
//!
//! A request is let through when it carries an unexpired token cookie. The
//! signed-in [UserID] is put in the request extensions for the handler, which
//! opens that user's expense session, and the cookie expiry slides forward on
//! the way out.

use axum::{
    extract::{FromRef, Request, State},
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use time::{Duration, UtcOffset};

use crate::{
    AppState,
    auth::{
        DEFAULT_COOKIE_DURATION, UserID,
        cookie::{extend_auth_cookie_duration_if_needed, get_token_from_cookies},
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
    timezone::get_local_offset,
};

/// What the guards need to read and refresh the token cookie.
#[derive(Clone)]
pub struct AuthState {
    /// Decrypts the private token cookie.
    pub cookie_key: Key,
    /// How long a freshly issued token cookie lasts.
    pub cookie_duration: Duration,
    /// Canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// How a request that is not signed in gets sent to the log-in page.
#[derive(Debug, Clone, Copy)]
enum SendToLogIn {
    /// A full page load follows a 303.
    Redirect,
    /// htmx swaps nothing and navigates on `HX-Redirect`.
    HxRedirect,
}

impl SendToLogIn {
    fn respond(self, log_in_url: String) -> Response {
        match self {
            SendToLogIn::Redirect => Redirect::to(&log_in_url).into_response(),
            SendToLogIn::HxRedirect => (HxRedirect(log_in_url), StatusCode::OK).into_response(),
        }
    }
}

/// Send the user back to the page they were on after logging in.
///
/// An `/api` request without the htmx headers has no page to return to, so the
/// user lands on the expenses page.
fn log_in_url_for(request: &Request) -> String {
    build_log_in_redirect_url(request).unwrap_or_else(|| {
        tracing::warn!(
            "No page to return to after log-in for {}, using the expenses page.",
            request.uri().path()
        );

        build_log_in_redirect_url_from_target(endpoints::EXPENSES_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    })
}

fn signed_in_user(jar: &PrivateCookieJar) -> Option<UserID> {
    get_token_from_cookies(jar).ok().map(|token| token.user_id)
}

/// Copy the refreshed token cookie onto `response`.
///
/// If the token cannot be refreshed the response goes out without a new
/// cookie and the old one runs out as normal.
fn with_refreshed_cookie(
    mut response: Response,
    jar: PrivateCookieJar,
    local_offset: UtcOffset,
) -> Response {
    let jar = match extend_auth_cookie_duration_if_needed(jar, DEFAULT_COOKIE_DURATION, local_offset)
    {
        Ok(jar) => jar,
        Err(error) => {
            tracing::error!("Could not refresh the token cookie: {error}");
            return response;
        }
    };

    let cookies = jar.into_response();
    for cookie in cookies.headers().get_all(SET_COOKIE) {
        response.headers_mut().append(SET_COOKIE, cookie.clone());
    }

    response
}

async fn guard(
    state: AuthState,
    mut request: Request,
    next: Next,
    send_to_log_in: SendToLogIn,
) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Unknown timezone {}, cannot check the token.", state.local_timezone);
        return send_to_log_in.respond(log_in_url_for(&request));
    };

    let jar = PrivateCookieJar::from_headers(request.headers(), state.cookie_key.clone());
    let Some(user_id) = signed_in_user(&jar) else {
        return send_to_log_in.respond(log_in_url_for(&request));
    };

    request.extensions_mut().insert(user_id);
    let response = next.run(request).await;

    with_refreshed_cookie(response, jar, local_offset)
}

/// Guard for pages such as `/expenses`.
///
/// Visitors without a valid token are redirected to the log-in page, which
/// brings them back to the requested page afterwards. Handlers behind this
/// guard receive the user as `Extension<UserID>`.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    guard(state, request, next, SendToLogIn::Redirect).await
}

/// Guard for the htmx endpoints under `/api`, such as `/api/expenses`.
///
/// Like [auth_guard], except that the log-in redirect is sent as
/// `HX-Redirect` and points back at the page htmx reports in `HX-Current-URL`.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    guard(state, request, next, SendToLogIn::HxRedirect).await
}
