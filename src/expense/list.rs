//! The table of expenses for one month, shared by the expenses page and the create endpoint.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, Month};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    expense::{Expense, aggregation::filter_by_month, month_from_index, month_index},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, format_date,
    },
};

/// The max number of graphemes to display in the title column before
/// truncating and displaying ellipses.
const MAX_TITLE_GRAPHEMES: usize = 32;

/// The order in which expenses are listed by date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Oldest first",
            SortOrder::Desc => "Newest first",
        }
    }
}

/// The month, year and order of the expenses being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSelection {
    pub month: Month,
    pub year: i32,
    pub sort: SortOrder,
}

impl ListSelection {
    /// Build a selection from optional query parameters, defaulting to the month of `today`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonth] if `month` is outside of `0..=11`.
    pub fn from_query(
        month: Option<u8>,
        year: Option<i32>,
        sort: Option<SortOrder>,
        today: Date,
    ) -> Result<Self, Error> {
        let month = match month {
            Some(index) => month_from_index(index)?,
            None => today.month(),
        };

        Ok(Self {
            month,
            year: year.unwrap_or(today.year()),
            sort: sort.unwrap_or_default(),
        })
    }

    pub fn with_sort(self, sort: SortOrder) -> Self {
        Self { sort, ..self }
    }

    /// The URL of the expenses page showing this selection.
    pub fn to_url(self) -> String {
        format!(
            "{}?month={}&year={}&sort={}",
            endpoints::EXPENSES_VIEW,
            month_index(self.month),
            self.year,
            self.sort.as_query_value()
        )
    }
}

/// Render the expenses of the selected month as a table.
///
/// The section has the ID `expense-list` so that htmx can swap in a fresh copy
/// after an expense is added.
pub fn expense_list_section(expenses: &[Expense], selection: ListSelection) -> Markup {
    let mut expenses = filter_by_month(expenses, selection.month, selection.year);
    match selection.sort {
        SortOrder::Asc => expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id))),
        SortOrder::Desc => expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id))),
    }

    let sort_link = selection.with_sort(selection.sort.toggled()).to_url();

    html! {
        section id="expense-list" class="w-full"
        {
            div class="flex justify-between items-center mb-2"
            {
                h2 class="text-xl font-semibold text-gray-900 dark:text-white"
                {
                    (selection.month) " " (selection.year)
                }

                a href=(sort_link) class=(LINK_STYLE) title="Change sort order"
                {
                    "Sort: " (selection.sort.label())
                }
            }

            div class="relative overflow-x-auto shadow-md rounded"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class="px-6 py-3" { "Title" }
                            th scope="col" class="px-6 py-3" { "Category" }
                            th scope="col" class="px-6 py-3" { "Date" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class="px-6 py-3" { span class="sr-only" { "Actions" } }
                        }
                    }

                    tbody
                    {
                        @for expense in &expenses {
                            (expense_row(expense))
                        }

                        @if expenses.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class="px-6 py-4 text-center" data-empty-message
                                {
                                    "No expenses for this month"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn expense_row(expense: &Expense) -> Markup {
    let (title, tooltip) = truncate_title(&expense.title);
    let delete_url = format_endpoint(endpoints::EXPENSE, expense.id);
    let confirm_message = format!("Are you sure you want to delete '{}'?", expense.title);
    let badge_colours = format!(
        "background-color: {}; color: {};",
        expense.category.colour(),
        expense.category.text_colour()
    );
    let date = format_date(expense.date);

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) title=[tooltip]
            {
                (title)
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) style=(badge_colours)
                {
                    (expense.category)
                }
            }

            td class=(TABLE_CELL_STYLE) { time datetime=(expense.date) { (date) } }

            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(expense.amount)) }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn truncate_title(title: &str) -> (String, Option<&str>) {
    if title.graphemes(true).count() <= MAX_TITLE_GRAPHEMES {
        return (title.to_owned(), None);
    }

    let truncated: String = title
        .graphemes(true)
        .take(MAX_TITLE_GRAPHEMES - 3)
        .collect();

    (truncated + "...", Some(title))
}

#[cfg(test)]
mod list_tests {
    use scraper::{Html, Selector};
    use time::{Month, macros::date};

    use crate::{
        Error,
        auth::UserID,
        expense::{
            Category, Expense,
            list::{ListSelection, SortOrder, expense_list_section, truncate_title},
        },
    };

    fn expense(id: i64, title: &str, date: time::Date) -> Expense {
        Expense {
            id,
            title: title.to_owned(),
            amount: 10.0,
            date,
            category: Category::Food,
            owner_id: UserID::new(1),
        }
    }

    fn january(sort: SortOrder) -> ListSelection {
        ListSelection {
            month: Month::January,
            year: 2024,
            sort,
        }
    }

    fn row_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tr[data-expense-id]").unwrap())
            .map(|row| row.value().attr("data-expense-id").unwrap().to_owned())
            .collect()
    }

    #[test]
    fn selection_defaults_to_current_month() {
        let selection = ListSelection::from_query(None, None, None, date!(2024 - 03 - 15)).unwrap();

        assert_eq!(
            selection,
            ListSelection {
                month: Month::March,
                year: 2024,
                sort: SortOrder::Desc
            }
        );
    }

    #[test]
    fn selection_uses_zero_indexed_month() {
        let selection =
            ListSelection::from_query(Some(0), Some(2023), Some(SortOrder::Asc), date!(2024 - 03 - 15))
                .unwrap();

        assert_eq!(selection.month, Month::January);
        assert_eq!(selection.year, 2023);
        assert_eq!(selection.sort, SortOrder::Asc);
        assert_eq!(selection.to_url(), "/expenses?month=0&year=2023&sort=asc");
    }

    #[test]
    fn selection_rejects_month_twelve() {
        let result = ListSelection::from_query(Some(12), None, None, date!(2024 - 03 - 15));

        assert_eq!(result, Err(Error::InvalidMonth(12)));
    }

    #[test]
    fn lists_only_selected_month() {
        let expenses = vec![
            expense(1, "January", date!(2024 - 01 - 10)),
            expense(2, "February", date!(2024 - 02 - 10)),
            expense(3, "Last year", date!(2023 - 01 - 10)),
        ];

        let html = Html::parse_fragment(
            &expense_list_section(&expenses, january(SortOrder::Desc)).into_string(),
        );

        assert_eq!(row_ids(&html), ["1"]);
    }

    #[test]
    fn sorts_by_date() {
        let expenses = vec![
            expense(1, "Middle", date!(2024 - 01 - 10)),
            expense(2, "Late", date!(2024 - 01 - 20)),
            expense(3, "Early", date!(2024 - 01 - 01)),
        ];

        let descending = Html::parse_fragment(
            &expense_list_section(&expenses, january(SortOrder::Desc)).into_string(),
        );
        let ascending = Html::parse_fragment(
            &expense_list_section(&expenses, january(SortOrder::Asc)).into_string(),
        );

        assert_eq!(row_ids(&descending), ["2", "1", "3"]);
        assert_eq!(row_ids(&ascending), ["3", "1", "2"]);
    }

    #[test]
    fn sort_link_toggles_order() {
        let html =
            Html::parse_fragment(&expense_list_section(&[], january(SortOrder::Desc)).into_string());

        let link = html
            .select(&Selector::parse("a[title='Change sort order']").unwrap())
            .next()
            .unwrap();

        assert_eq!(
            link.value().attr("href"),
            Some("/expenses?month=0&year=2024&sort=asc")
        );
    }

    #[test]
    fn shows_empty_message() {
        let html =
            Html::parse_fragment(&expense_list_section(&[], january(SortOrder::Desc)).into_string());

        let message = html
            .select(&Selector::parse("td[data-empty-message]").unwrap())
            .next()
            .expect("empty message missing")
            .text()
            .collect::<String>();

        assert_eq!(message.trim(), "No expenses for this month");
    }

    #[test]
    fn row_has_delete_button() {
        let expenses = vec![expense(42, "Lunch", date!(2024 - 01 - 10))];

        let html = Html::parse_fragment(
            &expense_list_section(&expenses, january(SortOrder::Desc)).into_string(),
        );
        let button = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .expect("delete button missing");

        assert_eq!(button.value().attr("hx-delete"), Some("/api/expenses/42"));
        assert_eq!(button.value().attr("hx-target"), Some("closest tr"));
        assert_eq!(button.value().attr("hx-swap"), Some("delete"));
        assert!(button.value().attr("hx-confirm").is_some());
    }

    #[test]
    fn row_shows_formatted_values() {
        let expenses = vec![expense(1, "Lunch", date!(2024 - 01 - 05))];

        let html = Html::parse_fragment(
            &expense_list_section(&expenses, january(SortOrder::Desc)).into_string(),
        );
        let cells: Vec<String> = html
            .select(&Selector::parse("tr[data-expense-id] td").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(cells[0], "Lunch");
        assert_eq!(cells[1], "Food");
        assert_eq!(cells[2], "Jan 05, 2024");
        assert_eq!(cells[3], "$10.00");
    }

    #[test]
    fn long_titles_are_truncated_with_tooltip() {
        let title = "A very long expense title that keeps on going";

        let (truncated, tooltip) = truncate_title(title);

        assert_eq!(truncated, "A very long expense title tha...");
        assert_eq!(tooltip, Some(title));
    }

    #[test]
    fn short_titles_are_not_truncated() {
        let title = "Exactly thirty two graphemes!!!!";
        assert_eq!(title.chars().count(), 32);

        assert_eq!(truncate_title(title), (title.to_owned(), None));
    }
}
