//! The route handler for the analysis page.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    analysis::{
        cards::summary_cards_view,
        charts::{
            AnalysisChart, category_chart, charts_script, charts_view, daily_chart, monthly_chart,
        },
    },
    auth::UserID,
    endpoints,
    expense::{Expense, ExpenseSessions, month_from_index, month_picker},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::{Page, nav_bar},
    timezone::local_today,
};

/// The state needed for the analysis page.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    pub sessions: ExpenseSessions,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnalysisState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sessions: state.sessions.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month and year shown by the daily and monthly charts.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// The zero-indexed month, 0 is January.
    pub month: Option<u8>,
    pub year: Option<i32>,
}

/// Display summary statistics and charts for the user's expenses.
///
/// The cards and the category chart cover every expense, the daily chart the
/// selected month and the monthly chart the selected year.
pub async fn get_analysis_page(
    State(state): State<AnalysisState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;
    let month = match query.month {
        Some(index) => month_from_index(index)?,
        None => today.month(),
    };
    let year = query.year.unwrap_or(today.year());

    let store = state
        .sessions
        .get_or_open(user_id)
        .inspect_err(|error| tracing::error!("Could not load expenses for user {user_id}: {error}"))?;
    let expenses = store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?
        .expenses()
        .to_vec();

    if expenses.is_empty() {
        return Ok(analysis_no_data_view().into_response());
    }

    let charts = [
        AnalysisChart {
            id: "daily-chart",
            options: daily_chart(&expenses, month, year).to_string(),
        },
        AnalysisChart {
            id: "monthly-chart",
            options: monthly_chart(&expenses, year).to_string(),
        },
        AnalysisChart {
            id: "category-chart",
            options: category_chart(&expenses).to_string(),
        },
    ];

    Ok(analysis_view(&expenses, &charts, month, year, today.year()).into_response())
}

fn analysis_no_data_view() -> Markup {
    let nav_bar = nav_bar(Page::Analysis);
    let expenses_link = link(endpoints::EXPENSES_VIEW, "expenses page");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you record some expenses on the "
                (expenses_link) "."
            }
        }
    );

    base("Analysis", &[], &content)
}

fn analysis_view(
    expenses: &[Expense],
    charts: &[AnalysisChart],
    month: Month,
    year: i32,
    current_year: i32,
) -> Markup {
    let nav_bar = nav_bar(Page::Analysis);

    let content = html!(
        (nav_bar)

        div class="flex flex-col px-6 py-8 mx-auto max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="mb-6"
            {
                h1 class="text-3xl font-bold" { "Expense Analysis" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Visualize and analyze your spending patterns"
                }
            }

            (summary_cards_view(expenses))

            div class="mb-4"
            {
                (month_picker(endpoints::ANALYSIS_VIEW, month, year, current_year, None))
            }

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Analysis", &scripts, &content)
}

#[cfg(test)]
mod analysis_page_tests {
    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::OffsetDateTime;

    use crate::{
        Error,
        analysis::get_analysis_page,
        auth::UserID,
        expense::{Category, ExpenseCandidate, ExpenseSessions, FakeRepository},
        test_utils::{assert_valid_html, get_test_connection_with_user, parse_html_document},
    };

    use super::{AnalysisQuery, AnalysisState};

    fn state_with_expense() -> (AnalysisState, UserID) {
        let (connection, user_id) = get_test_connection_with_user();
        let sessions = ExpenseSessions::sqlite(connection);
        sessions
            .open(user_id)
            .unwrap()
            .lock()
            .unwrap()
            .add(ExpenseCandidate {
                title: "Groceries".to_owned(),
                amount: 82.4,
                date: OffsetDateTime::now_utc().date(),
                category: Category::Food,
            })
            .unwrap();

        (
            AnalysisState {
                sessions,
                local_timezone: "Etc/UTC".to_owned(),
            },
            user_id,
        )
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{chart_id}")).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{chart_id}' not found"
        );
    }

    #[tokio::test]
    async fn analysis_page_loads_successfully() {
        let (state, user_id) = state_with_expense();

        let response = get_analysis_page(
            State(state),
            Extension(user_id),
            Query(AnalysisQuery::default()),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_chart_exists(&html, "daily-chart");
        assert_chart_exists(&html, "monthly-chart");
        assert_chart_exists(&html, "category-chart");
        let cards = html
            .select(&Selector::parse("#summary-cards div[data-card]").unwrap())
            .count();
        assert_eq!(cards, 4);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("$82.40"));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = AnalysisState {
            sessions: ExpenseSessions::sqlite(connection),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_analysis_page(
            State(state),
            Extension(user_id),
            Query(AnalysisQuery::default()),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing here yet..."));
        assert!(
            html.select(&Selector::parse("a[href='/expenses']").unwrap())
                .next()
                .is_some()
        );
        assert!(
            html.select(&Selector::parse("#charts").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn rejects_invalid_month() {
        let (state, user_id) = state_with_expense();

        let result = get_analysis_page(
            State(state),
            Extension(user_id),
            Query(AnalysisQuery {
                month: Some(12),
                year: None,
            }),
        )
        .await;

        assert_eq!(result.err(), Some(Error::InvalidMonth(12)));
    }

    #[tokio::test]
    async fn load_failure_is_an_error() {
        let repository = FakeRepository::failing();
        let state = AnalysisState {
            sessions: ExpenseSessions::new(move || Box::new(repository.clone())),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let result = get_analysis_page(
            State(state),
            Extension(UserID::new(1)),
            Query(AnalysisQuery::default()),
        )
        .await;

        assert!(result.is_err());
    }
}
