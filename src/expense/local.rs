//! Stores expenses as JSON files on the local disk, one file per owner.
//!
//! Used instead of the database when the server is started with a local storage directory.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    auth::UserID,
    expense::{Expense, ExpenseId, ExpenseRepository, NewExpense},
};

/// Stores each owner's expenses in `<directory>/expenses-<owner>.json`.
#[derive(Debug, Clone)]
pub struct LocalExpenseRepository {
    directory: PathBuf,
    // Guards the read-modify-write cycle of insert and delete.
    write_lock: Arc<Mutex<()>>,
}

impl LocalExpenseRepository {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn path_for(&self, owner: UserID) -> PathBuf {
        self.directory.join(format!("expenses-{owner}.json"))
    }
}

impl ExpenseRepository for LocalExpenseRepository {
    fn select_by_owner(&self, owner: UserID) -> Result<Vec<Expense>, Error> {
        let mut expenses: Vec<Expense> = read_json(self.path_for(owner))?;

        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(expenses)
    }

    fn insert(&self, owner: UserID, new_expense: NewExpense) -> Result<Expense, Error> {
        let _guard = self.write_lock.lock().map_err(|_| Error::DatabaseLockError)?;
        let path = self.path_for(owner);

        let mut expenses: Vec<Expense> = read_json(&path)?;
        let id = expenses.iter().map(|expense| expense.id).max().unwrap_or(0) + 1;
        let expense = new_expense.into_expense(id, owner);
        expenses.push(expense.clone());

        write_json_atomic(&path, &expenses)?;
        tracing::debug!("Wrote expense {id} to {}", path.display());

        Ok(expense)
    }

    fn delete(&self, owner: UserID, id: ExpenseId) -> Result<usize, Error> {
        let _guard = self.write_lock.lock().map_err(|_| Error::DatabaseLockError)?;
        let path = self.path_for(owner);

        let mut expenses: Vec<Expense> = read_json(&path)?;
        let count_before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        let deleted = count_before - expenses.len();

        if deleted > 0 {
            write_json_atomic(&path, &expenses)?;
        }

        Ok(deleted)
    }
}

/// Read JSON from a file, returning the default value if the file does not exist.
fn read_json<T, P>(path: P) -> Result<T, Error>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|error| {
        Error::LocalStorageError(format!("failed to open {}: {error}", path.display()))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|error| {
        Error::LocalStorageError(format!("failed to parse {}: {error}", path.display()))
    })
}

/// Write JSON to a temporary file and rename it over `path`.
///
/// Either the whole file is replaced or it is left untouched.
fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), Error>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            Error::LocalStorageError(format!(
                "failed to create directory {}: {error}",
                parent.display()
            ))
        })?;
    }

    // The temporary file must be on the same file system for the rename to be atomic.
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|error| {
        Error::LocalStorageError(format!("failed to create temp file: {error}"))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
    writer
        .flush()
        .map_err(|error| Error::LocalStorageError(format!("failed to flush data: {error}")))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|error| Error::LocalStorageError(format!("failed to sync data: {error}")))?;

    fs::rename(&temp_path, path).map_err(|error| {
        let _ = fs::remove_file(&temp_path);
        Error::LocalStorageError(format!("failed to rename temp file: {error}"))
    })
}
