//! Pure functions that turn a list of expenses into filtered subsets and summary statistics.
//!
//! None of these functions fail: an empty input produces a zero value or an
//! empty collection.

use std::collections::BTreeMap;

use time::{Date, Month};

use crate::expense::{Category, Expense};

/// The sum of the expenses on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    /// The calendar day.
    pub date: Date,
    /// The sum of the amounts.
    pub total: f64,
}

/// The sum of the expenses in one month of a year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    /// The month, in a year chosen by the caller.
    pub month: Month,
    /// The sum of the amounts, zero for a month without expenses.
    pub total: f64,
}

/// A category's slice of the total spending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    /// The category the share belongs to.
    pub category: Category,
    /// The sum of the amounts in the category.
    pub total: f64,
    /// The share of the total as a number from 0 to 100.
    pub percentage: f64,
}

/// The expenses dated in `month` of `year`, in their original order.
pub fn filter_by_month(expenses: &[Expense], month: Month, year: i32) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| expense.date.month() == month && expense.date.year() == year)
        .cloned()
        .collect()
}

/// The expenses dated in `year`, in their original order.
pub fn filter_by_year(expenses: &[Expense], year: i32) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| expense.date.year() == year)
        .cloned()
        .collect()
}

/// The expenses dated from `start` to `end`, including both ends.
///
/// If `start` is after `end` the result is empty.
pub fn filter_by_date_range(expenses: &[Expense], start: Date, end: Date) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| start <= expense.date && expense.date <= end)
        .cloned()
        .collect()
}

/// The sum of the amounts, zero if there are no expenses.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// The mean amount, or zero if there are no expenses.
pub fn average(expenses: &[Expense]) -> f64 {
    if expenses.is_empty() {
        return 0.0;
    }

    total(expenses) / expenses.len() as f64
}

/// The expense with the largest amount.
///
/// When several expenses share the largest amount, the first one wins.
pub fn highest(expenses: &[Expense]) -> Option<&Expense> {
    expenses.iter().fold(None, |best, expense| match best {
        Some(best) if expense.amount <= best.amount => Some(best),
        _ => Some(expense),
    })
}

/// The expense with the smallest amount.
///
/// When several expenses share the smallest amount, the first one wins.
pub fn lowest(expenses: &[Expense]) -> Option<&Expense> {
    expenses.iter().fold(None, |best, expense| match best {
        Some(best) if expense.amount >= best.amount => Some(best),
        _ => Some(expense),
    })
}

/// Sum the expenses per category.
///
/// Every category in `categories` has an entry, even if it has no expenses.
/// Expenses in categories that are not listed are ignored.
pub fn by_category(expenses: &[Expense], categories: &[Category]) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, f64> =
        categories.iter().map(|category| (*category, 0.0)).collect();

    for expense in expenses {
        if let Some(sum) = totals.get_mut(&expense.category) {
            *sum += expense.amount;
        }
    }

    totals
}

/// Sum the expenses in `month` of `year` per day, ordered by date.
///
/// Days without expenses are left out.
pub fn daily_totals(expenses: &[Expense], month: Month, year: i32) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for expense in filter_by_month(expenses, month, year) {
        *totals.entry(expense.date).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Sum the expenses in `year` per month, January first.
pub fn monthly_totals(expenses: &[Expense], year: i32) -> [MonthlyTotal; 12] {
    let mut totals = std::array::from_fn(|index| MonthlyTotal {
        month: Month::January.nth_next(index as u8),
        total: 0.0,
    });

    for expense in expenses.iter().filter(|expense| expense.date.year() == year) {
        totals[usize::from(u8::from(expense.date.month())) - 1].total += expense.amount;
    }

    totals
}

/// Like [daily_totals], but with an entry for every day of the month.
pub fn zero_filled_daily_totals(expenses: &[Expense], month: Month, year: i32) -> Vec<DailyTotal> {
    let Ok(mut date) = Date::from_calendar_date(year, month, 1) else {
        return Vec::new();
    };

    let totals: BTreeMap<Date, f64> = daily_totals(expenses, month, year)
        .into_iter()
        .map(|daily_total| (daily_total.date, daily_total.total))
        .collect();

    let mut filled = Vec::with_capacity(31);

    loop {
        filled.push(DailyTotal {
            date,
            total: totals.get(&date).copied().unwrap_or(0.0),
        });

        match date.next_day() {
            Some(next) if next.month() == month => date = next,
            _ => break,
        }
    }

    filled
}

/// Convert per-category totals into percentages, dropping empty categories.
pub fn category_shares(totals: &BTreeMap<Category, f64>) -> Vec<CategoryShare> {
    let grand_total: f64 = totals.values().sum();

    if grand_total <= 0.0 {
        return Vec::new();
    }

    totals
        .iter()
        .filter(|(_, total)| **total > 0.0)
        .map(|(category, total)| CategoryShare {
            category: *category,
            total: *total,
            percentage: total / grand_total * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Month, macros::date};

    use crate::{
        auth::UserID,
        expense::{
            Category, Expense,
            aggregation::{
                DailyTotal, average, by_category, category_shares, daily_totals,
                filter_by_date_range, filter_by_month, filter_by_year, highest, lowest,
                monthly_totals, total, zero_filled_daily_totals,
            },
        },
    };

    fn expense(id: i64, amount: f64, date: time::Date, category: Category) -> Expense {
        Expense {
            id,
            title: format!("Expense {id}"),
            amount,
            date,
            category,
            owner_id: UserID::new(1),
        }
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            expense(1, 50.0, date!(2024 - 01 - 05), Category::Food),
            expense(2, 30.0, date!(2024 - 01 - 05), Category::Transportation),
            expense(3, 20.0, date!(2024 - 02 - 01), Category::Food),
        ]
    }

    #[test]
    fn empty_collection_gives_zero_values() {
        assert_eq!(total(&[]), 0.0);
        assert_eq!(average(&[]), 0.0);
        assert_eq!(highest(&[]), None);
        assert_eq!(lowest(&[]), None);
        assert!(daily_totals(&[], Month::January, 2024).is_empty());
        assert!(
            monthly_totals(&[], 2024)
                .iter()
                .all(|monthly| monthly.total == 0.0)
        );
    }

    #[test]
    fn total_and_average() {
        let expenses = sample_expenses();

        assert_eq!(total(&expenses), 100.0);
        assert!((average(&expenses) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn by_category_includes_every_category() {
        let totals = by_category(&sample_expenses(), &Category::ALL);

        assert_eq!(totals.len(), 9);
        assert_eq!(totals[&Category::Food], 70.0);
        assert_eq!(totals[&Category::Transportation], 30.0);
        for category in [
            Category::Entertainment,
            Category::Shopping,
            Category::Utilities,
            Category::Health,
            Category::Travel,
            Category::Education,
            Category::Other,
        ] {
            assert_eq!(totals[&category], 0.0, "{category} should be zero");
        }
    }

    #[test]
    fn daily_totals_groups_by_day() {
        let totals = daily_totals(&sample_expenses(), Month::January, 2024);

        assert_eq!(
            totals,
            vec![DailyTotal {
                date: date!(2024 - 01 - 05),
                total: 80.0
            }]
        );
    }

    #[test]
    fn daily_totals_are_sorted_ascending() {
        let expenses = vec![
            expense(1, 5.0, date!(2024 - 03 - 20), Category::Food),
            expense(2, 7.0, date!(2024 - 03 - 02), Category::Food),
            expense(3, 1.0, date!(2024 - 03 - 20), Category::Other),
        ];

        let totals = daily_totals(&expenses, Month::March, 2024);

        assert_eq!(
            totals,
            vec![
                DailyTotal {
                    date: date!(2024 - 03 - 02),
                    total: 7.0
                },
                DailyTotal {
                    date: date!(2024 - 03 - 20),
                    total: 6.0
                },
            ]
        );
    }

    #[test]
    fn monthly_totals_has_twelve_months_in_order() {
        let totals = monthly_totals(&sample_expenses(), 2024);

        assert_eq!(totals[0].month, Month::January);
        assert_eq!(totals[0].total, 80.0);
        assert_eq!(totals[1].month, Month::February);
        assert_eq!(totals[1].total, 20.0);
        assert_eq!(totals[11].month, Month::December);
        assert!(totals[2..].iter().all(|monthly| monthly.total == 0.0));
    }

    #[test]
    fn monthly_totals_ignores_other_years() {
        let mut expenses = sample_expenses();
        expenses.push(expense(4, 1000.0, date!(2023 - 01 - 10), Category::Travel));

        let totals = monthly_totals(&expenses, 2024);

        assert_eq!(totals[0].total, 80.0);
    }

    #[test]
    fn filter_by_month_preserves_order() {
        let expenses = sample_expenses();

        let january = filter_by_month(&expenses, Month::January, 2024);

        assert_eq!(
            january.iter().map(|expense| expense.id).collect::<Vec<_>>(),
            [1, 2]
        );
        assert!(filter_by_month(&expenses, Month::January, 2023).is_empty());
    }

    #[test]
    fn filter_by_year_keeps_matching_year() {
        let mut expenses = sample_expenses();
        expenses.push(expense(4, 10.0, date!(2023 - 12 - 31), Category::Other));

        assert_eq!(filter_by_year(&expenses, 2024).len(), 3);
        assert_eq!(filter_by_year(&expenses, 2023).len(), 1);
    }

    #[test]
    fn date_range_is_inclusive() {
        let expenses = sample_expenses();

        let in_range = filter_by_date_range(&expenses, date!(2024 - 01 - 05), date!(2024 - 02 - 01));

        assert_eq!(in_range.len(), 3);
    }

    #[test]
    fn inverted_date_range_is_empty() {
        let expenses = sample_expenses();

        let in_range = filter_by_date_range(&expenses, date!(2024 - 02 - 01), date!(2024 - 01 - 05));

        assert!(in_range.is_empty());
    }

    #[test]
    fn highest_and_lowest_pick_first_on_ties() {
        let expenses = vec![
            expense(1, 10.0, date!(2024 - 01 - 01), Category::Food),
            expense(2, 99.0, date!(2024 - 01 - 02), Category::Food),
            expense(3, 10.0, date!(2024 - 01 - 03), Category::Food),
            expense(4, 99.0, date!(2024 - 01 - 04), Category::Food),
        ];

        assert_eq!(highest(&expenses).map(|expense| expense.id), Some(2));
        assert_eq!(lowest(&expenses).map(|expense| expense.id), Some(1));
    }

    #[test]
    fn zero_filled_daily_totals_covers_whole_month() {
        let totals = zero_filled_daily_totals(&sample_expenses(), Month::February, 2024);

        assert_eq!(totals.len(), 29);
        assert_eq!(totals[0].date, date!(2024 - 02 - 01));
        assert_eq!(totals[0].total, 20.0);
        assert_eq!(totals[28].date, date!(2024 - 02 - 29));
        assert!(totals[1..].iter().all(|daily| daily.total == 0.0));
    }

    #[test]
    fn zero_filled_daily_totals_for_december() {
        let totals = zero_filled_daily_totals(&[], Month::December, 2024);

        assert_eq!(totals.len(), 31);
        assert_eq!(totals[30].date, date!(2024 - 12 - 31));
    }

    #[test]
    fn category_shares_drops_empty_categories() {
        let totals = by_category(&sample_expenses(), &Category::ALL);

        let shares = category_shares(&totals);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, Category::Food);
        assert!((shares[0].percentage - 70.0).abs() < 1e-9);
        assert_eq!(shares[1].category, Category::Transportation);
        assert!((shares[1].percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn category_shares_of_nothing_is_empty() {
        let totals = by_category(&[], &Category::ALL);

        assert!(category_shares(&totals).is_empty());
    }
}

#[cfg(test)]
mod aggregation_properties {
    use proptest::prelude::*;
    use time::{Date, Month};

    use crate::{
        auth::UserID,
        expense::{
            Category, Expense,
            aggregation::{
                average, by_category, filter_by_month, filter_by_year, highest, lowest,
                monthly_totals, total,
            },
        },
    };

    fn arb_expense() -> impl Strategy<Value = Expense> {
        (
            1i64..10_000,
            1u32..=1_000_000,
            2022i32..=2025,
            1u16..=365,
            prop::sample::select(Category::ALL.to_vec()),
        )
            .prop_map(|(id, cents, year, ordinal, category)| Expense {
                id,
                title: format!("Expense {id}"),
                amount: f64::from(cents) / 100.0,
                date: Date::from_ordinal_date(year, ordinal).unwrap(),
                category,
                owner_id: UserID::new(1),
            })
    }

    fn arb_expenses() -> impl Strategy<Value = Vec<Expense>> {
        prop::collection::vec(arb_expense(), 0..50)
    }

    fn approx_eq(left: f64, right: f64) -> bool {
        (left - right).abs() <= 1e-6 * left.abs().max(right.abs()).max(1.0)
    }

    proptest! {
        #[test]
        fn total_is_sum_of_amounts(expenses in arb_expenses()) {
            let sum: f64 = expenses.iter().map(|expense| expense.amount).sum();

            prop_assert_eq!(total(&expenses), sum);
        }

        #[test]
        fn average_is_total_over_count(expenses in arb_expenses()) {
            prop_assume!(!expenses.is_empty());

            prop_assert!(approx_eq(
                average(&expenses),
                total(&expenses) / expenses.len() as f64
            ));
        }

        #[test]
        fn highest_and_lowest_bound_every_amount(expenses in arb_expenses()) {
            match (highest(&expenses), lowest(&expenses)) {
                (Some(max), Some(min)) => {
                    for expense in &expenses {
                        prop_assert!(expense.amount <= max.amount);
                        prop_assert!(expense.amount >= min.amount);
                    }
                }
                (None, None) => prop_assert!(expenses.is_empty()),
                _ => prop_assert!(false, "highest and lowest disagree on emptiness"),
            }
        }

        #[test]
        fn by_category_sums_to_total(expenses in arb_expenses()) {
            let totals = by_category(&expenses, &Category::ALL);

            prop_assert_eq!(totals.len(), 9);
            prop_assert!(approx_eq(totals.values().sum(), total(&expenses)));
        }

        #[test]
        fn monthly_totals_sum_to_yearly_total(expenses in arb_expenses(), year in 2022i32..=2025) {
            let totals = monthly_totals(&expenses, year);

            for (index, monthly) in totals.iter().enumerate() {
                prop_assert_eq!(monthly.month, Month::January.nth_next(index as u8));
            }

            let monthly_sum: f64 = totals.iter().map(|monthly| monthly.total).sum();
            prop_assert!(approx_eq(monthly_sum, total(&filter_by_year(&expenses, year))));
        }

        #[test]
        fn filter_by_month_is_idempotent(
            expenses in arb_expenses(),
            month in 1u8..=12,
            year in 2022i32..=2025,
        ) {
            let month = Month::try_from(month).unwrap();
            let once = filter_by_month(&expenses, month, year);
            let twice = filter_by_month(&once, month, year);

            prop_assert_eq!(once, twice);
        }
    }
}
