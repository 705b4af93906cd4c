//! Log-out route handler that ends the user's expense session, invalidates the
//! auth cookie and redirects to the log-in page.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{
    AppState,
    auth::{cookie::get_token_from_cookies, invalidate_auth_cookie},
    endpoints,
    expense::ExpenseSessions,
};

/// The state needed for logging out.
#[derive(Debug, Clone)]
pub struct LogOutState {
    pub cookie_key: Key,
    pub sessions: ExpenseSessions,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            sessions: state.sessions.clone(),
        }
    }
}

impl FromRef<LogOutState> for Key {
    fn from_ref(state: &LogOutState) -> Self {
        state.cookie_key.clone()
    }
}

/// Close the user's expense session, invalidate the auth cookie and redirect
/// the client to the log-in page.
pub async fn get_log_out(State(state): State<LogOutState>, jar: PrivateCookieJar) -> Response {
    if let Ok(token) = get_token_from_cookies(&jar) {
        state.sessions.close(token.user_id);
    }

    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
