//! The in-memory collection of a signed-in user's expenses.

use tokio::sync::watch;

use crate::{
    Error,
    auth::UserID,
    expense::{Expense, ExpenseCandidate, ExpenseId, ExpenseRepository},
};

/// Whether the store is waiting on the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing in flight.
    Idle,
    /// Waiting for the owner's expenses.
    Loading,
}

/// Holds the expenses of the current owner and keeps them in sync with the repository.
///
/// Mutations wait for the repository to acknowledge them before the in-memory
/// collection changes. If the repository fails, the collection is left as it was.
pub struct ExpenseStore {
    owner: Option<UserID>,
    repository: Box<dyn ExpenseRepository>,
    expenses: Vec<Expense>,
    status: watch::Sender<LoadState>,
}

impl ExpenseStore {
    /// Create an empty store. Call [ExpenseStore::load] to fetch the owner's expenses.
    pub fn new(owner: Option<UserID>, repository: Box<dyn ExpenseRepository>) -> Self {
        let (status, _) = watch::channel(LoadState::Idle);

        Self {
            owner,
            repository,
            expenses: Vec::new(),
            status,
        }
    }

    pub fn owner(&self) -> Option<UserID> {
        self.owner
    }

    /// The expenses in the store, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Receive a notification every time the store starts or finishes loading.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.status.subscribe()
    }

    pub fn load_state(&self) -> LoadState {
        *self.status.borrow()
    }

    /// Replace the collection with the owner's expenses from the repository.
    ///
    /// Without an owner the collection is cleared.
    ///
    /// # Errors
    ///
    /// Returns the repository's error, leaving the collection unchanged.
    pub fn load(&mut self) -> Result<(), Error> {
        let Some(owner) = self.owner else {
            self.expenses.clear();
            return Ok(());
        };

        self.status.send_replace(LoadState::Loading);
        let result = self.repository.select_by_owner(owner);
        self.status.send_replace(LoadState::Idle);

        match result {
            Ok(expenses) => {
                self.expenses = expenses;
                Ok(())
            }
            Err(error) => {
                tracing::error!("Could not load expenses for user {owner}: {error}");
                Err(error)
            }
        }
    }

    /// Validate and persist a new expense, then add it to the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is empty or the amount is not
    /// positive, [Error::AuthRequired] if the store has no owner, or the
    /// repository's error. The repository is not called unless the candidate
    /// is valid and there is an owner.
    pub fn add(&mut self, candidate: ExpenseCandidate) -> Result<Expense, Error> {
        let new_expense = candidate.validate()?;
        let owner = self.owner.ok_or(Error::AuthRequired)?;

        let expense = self.repository.insert(owner, new_expense)?;
        self.expenses.insert(0, expense.clone());

        Ok(expense)
    }

    /// Delete the expense with `id` from the repository and the collection.
    ///
    /// # Errors
    ///
    /// Returns [Error::AuthRequired] if the store has no owner,
    /// [Error::DeleteMissingExpense] if the owner has no expense with `id`, or
    /// the repository's error.
    pub fn remove(&mut self, id: ExpenseId) -> Result<(), Error> {
        let owner = self.owner.ok_or(Error::AuthRequired)?;

        if self.repository.delete(owner, id)? == 0 {
            return Err(Error::DeleteMissingExpense);
        }

        self.expenses.retain(|expense| expense.id != id);

        Ok(())
    }

    /// Forget the owner and discard the collection.
    pub fn sign_out(&mut self) {
        self.owner = None;
        self.expenses.clear();
    }
}
