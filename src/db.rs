//! Sets up the application database.

use rusqlite::Connection;

use crate::{Error, menu::create_menu_table, storage::create_key_value_table};

/// Create the tables for the menu and the key-value store.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if a table could not be created, in which case no tables
/// are created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_menu_table(&transaction)?;
    create_key_value_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
