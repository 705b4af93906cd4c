//! The fixed set of expense categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A label classifying an expense.
///
/// The declaration order is the canonical display order, and `Ord` follows it.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Fuel, fares and parking.
    Transportation,
    /// Going out, games and subscriptions.
    Entertainment,
    /// Clothes and household goods.
    Shopping,
    /// Power, water, phone and internet.
    Utilities,
    /// Doctor visits and medicine.
    Health,
    /// Flights, accommodation and other trip costs.
    Travel,
    /// Courses, books and fees.
    Education,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Health,
        Category::Travel,
        Category::Education,
        Category::Other,
    ];

    /// The display name, also used in forms and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    /// The hex colour used for this category in charts and badges.
    pub fn colour(&self) -> &'static str {
        match self {
            Category::Food => "#34D399",
            Category::Transportation => "#8B5CF6",
            Category::Entertainment => "#0EA5E9",
            Category::Shopping => "#FBBF24",
            Category::Utilities => "#9333EA",
            Category::Health => "#F87171",
            Category::Travel => "#3B82F6",
            Category::Education => "#F59E0B",
            Category::Other => "#6B7280",
        }
    }

    /// The text colour that stays readable on top of [Category::colour].
    pub fn text_colour(&self) -> &'static str {
        match self {
            Category::Shopping | Category::Education => "#000000",
            _ => "#FFFFFF",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<Category>()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod category_tests {
    use rusqlite::Connection;

    use crate::{Error, expense::Category};

    #[test]
    fn all_lists_nine_categories_in_canonical_order() {
        let names = Category::ALL.map(|category| category.to_string());

        assert_eq!(
            names,
            [
                "Food",
                "Transportation",
                "Entertainment",
                "Shopping",
                "Utilities",
                "Health",
                "Travel",
                "Education",
                "Other"
            ]
        );
    }

    #[test]
    fn ordering_follows_canonical_order() {
        let mut shuffled = vec![Category::Other, Category::Food, Category::Health];
        shuffled.sort();

        assert_eq!(
            shuffled,
            vec![Category::Food, Category::Health, Category::Other]
        );
    }

    #[test]
    fn parses_every_display_name() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "Groceries".parse::<Category>(),
            Err(Error::InvalidCategory("Groceries".to_owned()))
        );
        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn defaults_to_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn serializes_as_name() {
        assert_eq!(
            serde_json::to_string(&Category::Transportation).unwrap(),
            "\"Transportation\""
        );
    }

    #[test]
    fn round_trips_through_sqlite_text() {
        let connection = Connection::open_in_memory().unwrap();

        let category: Category = connection
            .query_row("SELECT ?1", (Category::Travel,), |row| row.get(0))
            .unwrap();
        let raw: String = connection
            .query_row("SELECT ?1", (Category::Travel,), |row| row.get(0))
            .unwrap();

        assert_eq!(category, Category::Travel);
        assert_eq!(raw, "Travel");
    }

    #[test]
    fn invalid_sqlite_text_is_an_error() {
        let connection = Connection::open_in_memory().unwrap();

        let result: rusqlite::Result<Category> =
            connection.query_row("SELECT 'Snacks'", (), |row| row.get(0));

        assert!(result.is_err());
    }
}
