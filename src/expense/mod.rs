//! Expenses: the model, the store that owns a user's expenses, the
//! aggregation functions over them and the pages for recording them.

pub mod aggregation;
mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod expenses_page;
mod form;
mod list;
mod local;
mod month_picker;
mod repository;
mod session;
mod store;

pub use aggregation::{
    average, by_category, category_shares, daily_totals, filter_by_date_range, filter_by_month,
    filter_by_year, highest, lowest, monthly_totals, total, zero_filled_daily_totals,
};
pub use category::Category;
pub use core::{
    Expense, ExpenseCandidate, ExpenseId, NewExpense, month_from_index, month_index,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use expenses_page::get_expenses_page;
pub use form::{ExpenseForm, expense_form};
pub use list::{SortOrder, expense_list_section};
pub use local::LocalExpenseRepository;
pub use month_picker::month_picker;
pub use repository::{ExpenseRepository, SqliteExpenseRepository, create_expense_table};
pub use session::ExpenseSessions;
pub use store::ExpenseStore;

#[cfg(test)]
pub(crate) use store::test_repository::FakeRepository;
