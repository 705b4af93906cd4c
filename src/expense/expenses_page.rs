//! Defines the route handler for the page that records and lists expenses.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    expense::{
        Expense, ExpenseSessions, expense_form, expense_list_section,
        list::{ListSelection, SortOrder},
        month_picker,
    },
    html::base,
    navigation::{Page, nav_bar},
    timezone::local_today,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    sessions: ExpenseSessions,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the expenses page.
#[derive(Debug, Default, Deserialize)]
pub struct ExpensesQuery {
    /// The zero-indexed month, 0 is January.
    pub month: Option<u8>,
    pub year: Option<i32>,
    pub sort: Option<SortOrder>,
}

/// Render the expense form and the expenses for the selected month.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<ExpensesQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;
    let selection = ListSelection::from_query(query.month, query.year, query.sort, today)?;

    let expenses = match load_expenses(&state.sessions, user_id) {
        Ok(expenses) => Some(expenses),
        Err(error) => {
            tracing::error!("Could not load expenses for user {user_id}: {error}");
            None
        }
    };

    let nav_bar = nav_bar(Page::Expenses);
    let content = html! {
        (nav_bar)

        div class="flex flex-col gap-6 px-6 py-8 mx-auto max-w-screen-lg lg:py-0"
        {
            div class="p-6 bg-white rounded shadow dark:bg-gray-800"
            {
                h1 class="mb-4 text-xl font-bold text-gray-900 dark:text-white" { "Add Expense" }
                (expense_form(today, selection))
            }

            (month_picker(
                endpoints::EXPENSES_VIEW,
                selection.month,
                selection.year,
                today.year(),
                Some(selection.sort),
            ))

            @match &expenses {
                Some(expenses) => { (expense_list_section(expenses, selection)) }
                None => { (load_error_view(selection)) }
            }
        }
    };

    Ok(base("Expenses", &[], &content).into_response())
}

fn load_expenses(sessions: &ExpenseSessions, user_id: UserID) -> Result<Vec<Expense>, Error> {
    let store = sessions.get_or_open(user_id)?;
    let store = store.lock().map_err(|_| Error::DatabaseLockError)?;

    Ok(store.expenses().to_vec())
}

fn load_error_view(selection: ListSelection) -> Markup {
    html! {
        section id="expense-list" class="w-full"
        {
            div
                role="alert"
                class="p-4 rounded-lg text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                p class="font-semibold" { "Failed to load your expenses" }
                p class="text-sm"
                {
                    "Something went wrong while loading your expenses. "
                    a href=(selection.to_url()) class="underline" { "Try again" }
                }
            }
        }
    }
}
