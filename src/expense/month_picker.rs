//! A small GET form for choosing the month and year a page shows.

use maud::{Markup, html};
use time::Month;

use crate::{
    expense::{SortOrder, month_index},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// How many years either side of the current year the year picker offers.
const YEAR_PICKER_SPAN: i32 = 5;

/// Render a form that reloads `action` with the chosen `month` and `year`.
///
/// Months are submitted zero-indexed. The year select offers
/// `current_year` plus or minus five years, and `year` itself when it falls
/// outside that range. If `sort` is given it is kept in a hidden input.
pub fn month_picker(
    action: &str,
    month: Month,
    year: i32,
    current_year: i32,
    sort: Option<SortOrder>,
) -> Markup {
    let years = year_options(year, current_year);

    html! {
        form
            method="get"
            action=(action)
            class="flex flex-wrap items-end gap-4"
        {
            @if let Some(sort) = sort {
                input type="hidden" name="sort" value=(sort.as_query_value());
            }

            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for index in 0..12u8 {
                        option
                            value=(index)
                            selected[month_index(month) == index]
                        {
                            (Month::January.nth_next(index))
                        }
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                select name="year" id="year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option_year in years {
                        option value=(option_year) selected[option_year == year] { (option_year) }
                    }
                }
            }

            div
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Show" }
            }
        }
    }
}

fn year_options(year: i32, current_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> =
        ((current_year - YEAR_PICKER_SPAN)..=(current_year + YEAR_PICKER_SPAN)).collect();

    if !years.contains(&year) {
        let position = years.partition_point(|&option_year| option_year < year);
        years.insert(position, year);
    }

    years
}
