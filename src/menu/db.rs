//! Database operations for the menu.

use rusqlite::{Connection, Row, params_from_iter};

use crate::{
    Error,
    menu::{
        Category, FilterCriteria, MenuItem,
        query::build_filter_query,
        schema::{MENU_TABLE, MenuColumn},
    },
};

/// Retrieve the distinct categories of the items on the menu.
///
/// Categories are returned in the order they first appear in the menu table.
/// Callers should not depend on this order.
pub fn get_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    let category = MenuColumn::Category;

    connection
        .prepare(&format!(
            "SELECT {category} FROM {MENU_TABLE} GROUP BY {category} ORDER BY MIN(rowid) ASC;"
        ))?
        .query_map([], |row| {
            let label: String = row.get(0)?;
            Ok(Category::new(&label))
        })?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the menu items that match `criteria`, in the order they were added.
///
/// An item matches if its category is one of the selected categories (when
/// any are selected) and its name contains the search term, ignoring ASCII
/// case (when the search term is not empty). Empty criteria return the whole menu.
pub fn filter_menu(
    criteria: &FilterCriteria,
    connection: &Connection,
) -> Result<Vec<MenuItem>, Error> {
    let query = build_filter_query(criteria);

    tracing::debug!("filtering menu with {:?}", query.params);

    connection
        .prepare(&query.sql)?
        .query_map(params_from_iter(query.params.iter()), map_row)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Add an item to the menu.
///
/// The app itself never changes the menu, this is for seeding the database.
///
/// # Errors
/// Returns an error if an item with the same name already exists, or if there
/// is some other SQL error.
pub fn insert_menu_item(item: &MenuItem, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        &format!(
            "INSERT INTO {MENU_TABLE} ({}, {}, {}, {}) VALUES (?1, ?2, ?3, ?4);",
            MenuColumn::Name,
            MenuColumn::Category,
            MenuColumn::Price,
            MenuColumn::Description
        ),
        (
            &item.name,
            item.category.as_ref(),
            item.price,
            &item.description,
        ),
    )?;

    Ok(())
}

/// Create the menu table.
pub fn create_menu_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {MENU_TABLE} (
            {} TEXT PRIMARY KEY,
            {} TEXT NOT NULL,
            {price} REAL NOT NULL CHECK ({price} >= 0),
            {} TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_menu_category ON {MENU_TABLE}({});",
        MenuColumn::Name,
        MenuColumn::Category,
        MenuColumn::Description,
        MenuColumn::Category,
        price = MenuColumn::Price,
    ))?;

    Ok(())
}

fn map_row(row: &Row) -> Result<MenuItem, rusqlite::Error> {
    let name = row.get(MenuColumn::Name.index())?;
    let raw_category: String = row.get(MenuColumn::Category.index())?;
    let price = row.get(MenuColumn::Price.index())?;
    let description = row.get(MenuColumn::Description.index())?;

    Ok(MenuItem {
        name,
        category: Category::new(&raw_category),
        price,
        description,
    })
}
