//! The persistence boundary for expenses and its SQLite implementation.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    auth::UserID,
    expense::{Expense, ExpenseId, NewExpense, core::map_expense_row},
};

/// Stores the expenses of each owner.
///
/// Every operation is scoped to the `owner` it is given, so one user can never
/// read or delete another user's expenses.
pub trait ExpenseRepository: Send {
    /// All of the expenses belonging to `owner`, newest first.
    ///
    /// Expenses on the same date are ordered by descending ID.
    fn select_by_owner(&self, owner: UserID) -> Result<Vec<Expense>, Error>;

    /// Store `new_expense` for `owner` and return the stored expense with its new ID.
    fn insert(&self, owner: UserID, new_expense: NewExpense) -> Result<Expense, Error>;

    /// Delete the expense with `id` if it belongs to `owner`.
    ///
    /// Returns the number of deleted rows, which is zero if there was no such expense.
    fn delete(&self, owner: UserID, id: ExpenseId) -> Result<usize, Error>;
}

/// Stores expenses in the `expense` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteExpenseRepository {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteExpenseRepository {
    /// Create a repository over the shared database `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ExpenseRepository for SqliteExpenseRepository {
    fn select_by_owner(&self, owner: UserID) -> Result<Vec<Expense>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .prepare(
                "SELECT id, title, amount, date, category, user_id FROM expense
                WHERE user_id = :user_id
                ORDER BY date DESC, id DESC;",
            )?
            .query_map(&[(":user_id", &owner.as_i64())], map_expense_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    fn insert(&self, owner: UserID, new_expense: NewExpense) -> Result<Expense, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .prepare(
                "INSERT INTO expense (title, amount, date, category, user_id)
                VALUES (?1, ?2, ?3, ?4, ?5)
                RETURNING id, title, amount, date, category, user_id;",
            )?
            .query_row(
                (
                    new_expense.title(),
                    new_expense.amount(),
                    new_expense.date(),
                    new_expense.category(),
                    owner.as_i64(),
                ),
                map_expense_row,
            )
            .map_err(Error::from)
    }

    fn delete(&self, owner: UserID, id: ExpenseId) -> Result<usize, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .execute(
                "DELETE FROM expense WHERE id = ?1 AND user_id = ?2;",
                (id, owner.as_i64()),
            )
            .map_err(Error::from)
    }
}

/// Create the expense table and its index.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount > 0),
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);",
    )
}
