//! The form for recording a new expense.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    expense::{Category, ExpenseCandidate, list::ListSelection, list::SortOrder, month_index},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
};

/// The form data for creating an expense.
///
/// `month`, `year` and `sort` describe the list the user is looking at, so the
/// response can re-render that same list.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub title: String,
    /// The value of the expense in dollars.
    pub amount: f64,
    pub date: Date,
    #[serde(default)]
    pub category: Category,
    pub month: Option<u8>,
    pub year: Option<i32>,
    pub sort: Option<SortOrder>,
}

impl ExpenseForm {
    pub fn candidate(&self) -> ExpenseCandidate {
        ExpenseCandidate {
            title: self.title.clone(),
            amount: self.amount,
            date: self.date,
            category: self.category,
        }
    }
}

/// Render the create expense form.
///
/// On success the server responds with a fresh `#expense-list` and the form is
/// reset. Errors are shown in the alert container.
pub fn expense_form(today: Date, selection: ListSelection) -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES_API)
            hx-target="#expense-list"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-disabled-elt="find button[type='submit']"
            hx-indicator="#indicator"
            "hx-on::after-request"="if(event.detail.successful) this.reset()"
            class="w-full space-y-4"
        {
            input type="hidden" name="month" value=(month_index(selection.month));
            input type="hidden" name="year" value=(selection.year);
            input type="hidden" name="sort" value=(selection.sort.as_query_value());

            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                input
                    name="title"
                    id="title"
                    type="text"
                    placeholder="What did you spend money on?"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="relative w-full"
                    {
                        span
                            class="absolute inset-y-0 left-0 flex items-center pl-2.5 \
                                pointer-events-none text-sm text-gray-500 dark:text-gray-400"
                        {
                            "$"
                        }

                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            class={ (FORM_TEXT_INPUT_STYLE) " pl-6" };
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category) selected[category == Category::default()]
                        {
                            (category)
                        }
                    }
                }
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                " Add Expense"
            }
        }
    }
}
