//! ECharts configuration for the analysis page.
//!
//! Each chart is rendered to an ECharts option object with charming and initialised in the
//! browser by [charts_script].

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Label, Tooltip,
        Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};
use time::Month;

use crate::{
    expense::{
        Category, Expense, by_category, category_shares, monthly_totals, zero_filled_daily_totals,
    },
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct AnalysisChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JavaScript object literal
    pub options: String,
}

/// Renders a container div for each chart.
pub(super) fn charts_view(charts: &[AnalysisChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates the script that initialises every chart once the page has loaded.
///
/// Charts follow the browser's colour scheme and resize with the window.
pub(super) fn charts_script(charts: &[AnalysisChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

/// Bar chart of the spending on each day of `month`, including days without any.
pub(super) fn daily_chart(expenses: &[Expense], month: Month, year: i32) -> Chart {
    let daily_totals = zero_filled_daily_totals(expenses, month, year);
    let labels = daily_totals
        .iter()
        .map(|daily_total| daily_total.date.day().to_string())
        .collect::<Vec<_>>();
    let values = daily_totals
        .iter()
        .map(|daily_total| daily_total.total)
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Daily Expenses")
                .subtext(format!("{month} {year}")),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Spent").data(values))
}

/// Bar chart with one bar per month of `year`.
pub(super) fn monthly_chart(expenses: &[Expense], year: i32) -> Chart {
    let totals = monthly_totals(expenses, year);
    let labels = totals
        .iter()
        .map(|monthly_total| short_month_name(monthly_total.month).to_owned())
        .collect::<Vec<_>>();
    let values = totals
        .iter()
        .map(|monthly_total| monthly_total.total)
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Monthly Expenses").subtext(year.to_string()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Spent").data(values))
}

/// Pie chart of the share of all spending in each category.
///
/// Categories without any spending are left out.
pub(super) fn category_chart(expenses: &[Expense]) -> Chart {
    let shares = category_shares(&by_category(expenses, &Category::ALL));
    let colours = shares
        .iter()
        .map(|share| Color::from(share.category.colour()))
        .collect::<Vec<_>>();
    let data = shares
        .iter()
        .map(|share| (share.total, share.category.as_str()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Expenses by Category").subtext("All time"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .color(colours)
        .series(
            Pie::new()
                .name("Spent")
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}

fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"$0.00\";",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod chart_tests {
    use serde_json::Value;
    use time::{Date, Month, macros::date};

    use crate::{
        auth::UserID,
        expense::{Category, Expense},
    };

    use super::{category_chart, daily_chart, monthly_chart};

    fn expense(id: i64, amount: f64, date: Date, category: Category) -> Expense {
        Expense {
            id,
            title: format!("Expense {id}"),
            amount,
            date,
            category,
            owner_id: UserID::new(1),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, 50.0, date!(2024 - 01 - 05), Category::Food),
            expense(2, 30.0, date!(2024 - 01 - 05), Category::Transportation),
            expense(3, 20.0, date!(2024 - 02 - 01), Category::Food),
        ]
    }

    // The rendered options embed JavaScript formatters, so inspect the
    // serialised value rather than parsing the rendered text.
    fn options(chart: &charming::Chart) -> Value {
        serde_json::to_value(chart).unwrap()
    }

    // charming writes a component as an array when there may be several.
    fn first(component: &Value) -> &Value {
        match component {
            Value::Array(items) => &items[0],
            other => other,
        }
    }

    fn series_data(options: &Value) -> &Vec<Value> {
        first(&options["series"])["data"].as_array().unwrap()
    }

    #[test]
    fn daily_chart_has_a_bar_for_every_day() {
        let chart = daily_chart(&sample(), Month::January, 2024);
        let options = options(&chart);

        let data = series_data(&options);
        assert_eq!(data.len(), 31);
        assert_eq!(data[4].as_f64(), Some(80.0));
        assert_eq!(data[0].as_f64(), Some(0.0));
        assert_eq!(first(&options["xAxis"])["data"][0], "1");
        assert!(chart.to_string().contains("currencyFormatter.format(number)"));
    }

    #[test]
    fn daily_chart_handles_leap_february() {
        let options = options(&daily_chart(&sample(), Month::February, 2024));

        assert_eq!(series_data(&options).len(), 29);
    }

    #[test]
    fn monthly_chart_has_twelve_bars() {
        let options = options(&monthly_chart(&sample(), 2024));

        let data = series_data(&options);
        assert_eq!(data.len(), 12);
        assert_eq!(data[0].as_f64(), Some(80.0));
        assert_eq!(data[1].as_f64(), Some(20.0));
        assert_eq!(first(&options["xAxis"])["data"][11], "Dec");
    }

    #[test]
    fn category_chart_omits_empty_categories() {
        let options = options(&category_chart(&sample()));

        let names: Vec<_> = series_data(&options)
            .iter()
            .map(|point| point["name"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, ["Food", "Transportation"]);
        assert_eq!(options["color"][0], Category::Food.colour());
        assert_eq!(first(&options["series"])["label"]["formatter"], "{b}: {d}%");
    }
}
