//! The analysis page: summary cards and charts over a user's expenses.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_analysis_page;
