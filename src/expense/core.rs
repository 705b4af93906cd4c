//! The expense model and the validation applied to user input before it is persisted.

use rusqlite::Row;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{Error, auth::UserID, expense::Category};

/// The ID of an expense, assigned by the storage backend on creation.
pub type ExpenseId = i64;

/// A single recorded spending event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique per storage backend.
    pub id: ExpenseId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// The amount spent in dollars, always greater than zero.
    pub amount: f64,
    /// The day the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// What kind of spending this was.
    pub category: Category,
    /// The user that recorded the expense.
    pub owner_id: UserID,
}

/// Expense data as entered by the user, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseCandidate {
    /// Blank titles are rejected, surrounding whitespace is trimmed.
    pub title: String,
    /// Must be a finite number greater than zero.
    pub amount: f64,
    /// The day the money was spent.
    pub date: Date,
    /// Defaults to [Category::Other] when the form leaves it out.
    pub category: Category,
}

impl ExpenseCandidate {
    /// Check the candidate can be stored as an expense.
    ///
    /// The title is trimmed before it is checked.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyTitle] if the title is blank, or
    /// [Error::NonPositiveAmount] if the amount is not a finite number greater
    /// than zero.
    pub fn validate(self) -> Result<NewExpense, Error> {
        let title = self.title.trim();

        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(NewExpense {
            title: title.to_owned(),
            amount: self.amount,
            date: self.date,
            category: self.category,
        })
    }
}

/// An expense that passed validation and is ready to be stored.
///
/// The only way to construct this type is [ExpenseCandidate::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    title: String,
    amount: f64,
    date: Date,
    category: Category,
}

impl NewExpense {
    /// The trimmed, non-empty title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The amount in dollars, greater than zero.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The day the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The category chosen for the expense.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Attach the storage-assigned `id` and the `owner_id`.
    pub fn into_expense(self, id: ExpenseId, owner_id: UserID) -> Expense {
        Expense {
            id,
            title: self.title,
            amount: self.amount,
            date: self.date,
            category: self.category,
            owner_id,
        }
    }
}

/// Convert a zero-indexed month number (0 is January) to a [Month].
///
/// # Errors
///
/// Returns [Error::InvalidMonth] if `index` is greater than 11.
pub fn month_from_index(index: u8) -> Result<Month, Error> {
    if index > 11 {
        return Err(Error::InvalidMonth(index));
    }

    Month::try_from(index + 1).map_err(|_| Error::InvalidMonth(index))
}

/// The zero-indexed number of `month`, the inverse of [month_from_index].
pub fn month_index(month: Month) -> u8 {
    u8::from(month) - 1
}

/// Map a row with the columns `id, title, amount, date, category, user_id`.
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
        owner_id: UserID::new(row.get(5)?),
    })
}

/// Serializes a [Date] as an ISO 8601 calendar date, e.g. "2024-01-05".
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(ISO_DATE_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, ISO_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
