//! Defines the endpoint for deleting an expense.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    expense::{ExpenseId, ExpenseSessions},
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub sessions: ExpenseSessions,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
        }
    }
}

/// A route handler for deleting an expense, responds with an alert.
///
/// The status code has to be 200 OK on success or htmx will not remove the table row.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
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

    match store.remove(expense_id) {
        Ok(()) => Alert::Success {
            message: "Expense deleted successfully!".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}
