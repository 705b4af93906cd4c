//! The summary cards at the top of the analysis page.

use maud::{Markup, html};

use crate::{
    expense::{Expense, average, highest, lowest, total},
    html::{format_currency, format_date},
};

/// Renders the total, average, highest and lowest expense cards.
pub(super) fn summary_cards_view(expenses: &[Expense]) -> Markup {
    html! {
        section id="summary-cards" class="w-full mx-auto mb-8"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (summary_card(
                    "Total Expenses",
                    &format_currency(total(expenses)),
                    Some("Across all recorded expenses"),
                ))
                (summary_card(
                    "Average Expense",
                    &format_currency(average(expenses)),
                    Some("Per expense entry"),
                ))
                (extreme_card("Highest Expense", highest(expenses)))
                (extreme_card("Lowest Expense", lowest(expenses)))
            }
        }
    }
}

fn extreme_card(label: &str, expense: Option<&Expense>) -> Markup {
    match expense {
        Some(expense) => {
            let detail = format!("{} on {}", expense.title, format_date(expense.date));
            summary_card(label, &format_currency(expense.amount), Some(&detail))
        }
        None => summary_card(label, &format_currency(0.0), None),
    }
}

fn summary_card(label: &str, value: &str, detail: Option<&str>) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-card=(label)
        {
            p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            p class="text-2xl font-bold text-gray-900 dark:text-white" data-card-value { (value) }

            @if let Some(detail) = detail {
                p class="mt-1 text-sm text-gray-600 dark:text-gray-400 truncate" title=(detail)
                {
                    (detail)
                }
            }
        }
    }
}
