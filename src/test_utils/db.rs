use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    auth::{PasswordHash, UserID, create_user},
    db::initialize,
};

/// An initialized in-memory database with one registered user.
pub(crate) fn get_test_connection_with_user() -> (Arc<Mutex<Connection>>, UserID) {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database");
    initialize(&connection).expect("Could not initialize database");
    let user = create_user(
        &"test@example.com".parse().unwrap(),
        PasswordHash::new_unchecked("hunter2"),
        &connection,
    )
    .expect("Could not create test user");

    (Arc::new(Mutex::new(connection)), user.id)
}
