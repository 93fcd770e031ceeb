//! The columns of the `menu` table.
//!
//! Queries refer to columns through [MenuColumn] so that column names are
//! written down in one place.

use std::fmt::Display;

/// The name of the table that holds the menu.
pub const MENU_TABLE: &str = "menu";

/// A column of the `menu` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuColumn {
    Name,
    Category,
    Price,
    Description,
}

impl MenuColumn {
    /// All columns in the order rows are mapped by `map_row`.
    pub const ALL: [MenuColumn; 4] = [
        MenuColumn::Name,
        MenuColumn::Category,
        MenuColumn::Price,
        MenuColumn::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuColumn::Name => "name",
            MenuColumn::Category => "category",
            MenuColumn::Price => "price",
            MenuColumn::Description => "description",
        }
    }

    /// The position of the column in a row selected with [select_columns].
    pub fn index(&self) -> usize {
        match self {
            MenuColumn::Name => 0,
            MenuColumn::Category => 1,
            MenuColumn::Price => 2,
            MenuColumn::Description => 3,
        }
    }
}

impl Display for MenuColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comma separated list of every column, e.g. for `SELECT <columns> FROM menu`.
pub fn select_columns() -> String {
    MenuColumn::ALL
        .iter()
        .map(MenuColumn::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod schema_tests {
    use super::{MenuColumn, select_columns};

    #[test]
    fn select_columns_lists_columns_in_index_order() {
        assert_eq!(select_columns(), "name, category, price, description");

        for (position, column) in MenuColumn::ALL.iter().enumerate() {
            assert_eq!(column.index(), position, "column {column}");
        }
    }
}
