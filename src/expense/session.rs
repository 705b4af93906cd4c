//! Keeps one [ExpenseStore] per signed-in user.

use std::{
    collections::{HashMap, hash_map::Entry},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    auth::UserID,
    expense::{ExpenseRepository, ExpenseStore, LocalExpenseRepository, SqliteExpenseRepository},
};

/// A store shared between the requests of one session.
pub type SharedExpenseStore = Arc<Mutex<ExpenseStore>>;

type RepositoryFactory = Arc<dyn Fn() -> Box<dyn ExpenseRepository> + Send + Sync>;

/// The registry of expense stores for the users that are currently signed in.
#[derive(Clone)]
pub struct ExpenseSessions {
    stores: Arc<Mutex<HashMap<UserID, SharedExpenseStore>>>,
    new_repository: RepositoryFactory,
}

impl std::fmt::Debug for ExpenseSessions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseSessions").finish_non_exhaustive()
    }
}

impl ExpenseSessions {
    /// Create a registry whose stores get their repository from `new_repository`.
    pub fn new(
        new_repository: impl Fn() -> Box<dyn ExpenseRepository> + Send + Sync + 'static,
    ) -> Self {
        Self {
            stores: Arc::new(Mutex::new(HashMap::new())),
            new_repository: Arc::new(new_repository),
        }
    }

    /// Stores persist to the `expense` table of the database behind `connection`.
    pub fn sqlite(connection: Arc<Mutex<Connection>>) -> Self {
        Self::new(move || Box::new(SqliteExpenseRepository::new(connection.clone())))
    }

    /// Stores persist to JSON files in `directory`.
    pub fn local(directory: PathBuf) -> Self {
        let repository = LocalExpenseRepository::new(directory);

        Self::new(move || Box::new(repository.clone()))
    }

    /// Load the expenses of `owner` at sign-in.
    ///
    /// A store that is already open for `owner` is reloaded in place, so every
    /// request of the session keeps sharing one store.
    ///
    /// # Errors
    ///
    /// Returns an error if the expenses could not be loaded, in which case no
    /// new store is registered.
    pub fn open(&self, owner: UserID) -> Result<SharedExpenseStore, Error> {
        match self.registered(owner)? {
            Some(store) => {
                store
                    .lock()
                    .map_err(|_| Error::DatabaseLockError)?
                    .load()?;
                tracing::debug!("Reloaded expense session for user {owner}");

                Ok(store)
            }
            None => self.load_and_register(owner),
        }
    }

    /// Get the store for `owner`, opening one if there is none.
    ///
    /// A valid auth cookie outlives a server restart, so a signed-in user
    /// may not have a store yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a new store could not be loaded.
    pub fn get_or_open(&self, owner: UserID) -> Result<SharedExpenseStore, Error> {
        match self.registered(owner)? {
            Some(store) => Ok(store),
            None => self.load_and_register(owner),
        }
    }

    fn registered(&self, owner: UserID) -> Result<Option<SharedExpenseStore>, Error> {
        Ok(self
            .stores
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .get(&owner)
            .cloned())
    }

    /// The registry lock is not held while loading. If another request
    /// registered a store for `owner` in the meantime, that store wins and the
    /// one loaded here is dropped.
    fn load_and_register(&self, owner: UserID) -> Result<SharedExpenseStore, Error> {
        let mut store = ExpenseStore::new(Some(owner), (self.new_repository)());
        store.load()?;

        let mut stores = self.stores.lock().map_err(|_| Error::DatabaseLockError)?;
        let registered = match stores.entry(owner) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                tracing::debug!("Opened expense session for user {owner}");
                entry.insert(Arc::new(Mutex::new(store))).clone()
            }
        };

        Ok(registered)
    }

    /// Sign the store for `owner` out and forget it.
    ///
    /// Returns `true` if a store was open.
    pub fn close(&self, owner: UserID) -> bool {
        let removed = match self.stores.lock() {
            Ok(mut stores) => stores.remove(&owner),
            Err(error) => {
                tracing::error!("Could not lock the expense sessions: {error}");
                return false;
            }
        };

        let Some(store) = removed else {
            return false;
        };

        if let Ok(mut store) = store.lock() {
            store.sign_out();
        }
        tracing::debug!("Closed expense session for user {owner}");

        true
    }

    /// Whether a store is open for `owner`.
    pub fn is_open(&self, owner: UserID) -> bool {
        self.stores
            .lock()
            .map(|stores| stores.contains_key(&owner))
            .unwrap_or(false)
    }
}
