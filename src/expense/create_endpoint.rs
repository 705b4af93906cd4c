//! Defines the endpoint for recording a new expense.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    expense::{ExpenseForm, ExpenseSessions, expense_list_section, list::ListSelection},
    timezone::local_today,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub sessions: ExpenseSessions,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense.
///
/// Responds with the re-rendered expense list and a success alert, or with an
/// error alert if the expense was rejected.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let Some(today) = local_today(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let selection = match ListSelection::from_query(form.month, form.year, form.sort, today) {
        Ok(selection) => selection,
        Err(error) => return error.into_alert_response(),
    };

    let store = match state.sessions.get_or_open(user_id) {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Could not open expenses for user {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    let mut store = match store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = store.add(form.candidate()) {
        tracing::warn!("Could not add expense for user {user_id}: {error}");
        return error.into_alert_response();
    }

    html! {
        (expense_list_section(store.expenses(), selection))
        (Alert::Success { message: "Expense added successfully!".to_owned() }.into_oob_html())
    }
    .into_response()
}
