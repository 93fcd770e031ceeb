//! Core menu domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A label that groups menu items, e.g. "Starters" or "Desserts".
///
/// Categories are not stored on their own, they are derived from the items on
/// the menu.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(String);

impl Category {
    /// Create a category label.
    pub fn new(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dish on the menu.
///
/// Items are read-only to the app, they are only ever created when seeding
/// the database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// The dish's name, unique across the menu.
    pub name: String,
    /// The category the dish is listed under.
    pub category: Category,
    /// The non-negative price in dollars.
    pub price: f64,
    /// A short description shown under the name, may be empty.
    #[serde(default)]
    pub description: String,
}

impl MenuItem {
    /// Create a menu item.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidMenuItem] if `name` or
    /// `category` is empty or only whitespace, or if `price` is negative or
    /// not a finite number.
    pub fn new(name: &str, category: &str, price: f64, description: &str) -> Result<Self, Error> {
        let name = name.trim();
        let category = category.trim();

        if name.is_empty() {
            return Err(Error::InvalidMenuItem("name cannot be empty".to_owned()));
        }

        if category.is_empty() {
            return Err(Error::InvalidMenuItem(format!(
                "category for \"{name}\" cannot be empty"
            )));
        }

        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidMenuItem(format!(
                "price for \"{name}\" must be a non-negative number, got {price}"
            )));
        }

        Ok(Self {
            name: name.to_owned(),
            category: Category::new(category),
            price,
            description: description.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod menu_item_tests {
    use crate::{Error, menu::Category};

    use super::MenuItem;

    #[test]
    fn new_succeeds_on_valid_item() {
        let item = MenuItem::new(" Greek Salad ", "Starters", 12.99, "Crispy lettuce");

        let want = MenuItem {
            name: "Greek Salad".to_owned(),
            category: Category::new("Starters"),
            price: 12.99,
            description: "Crispy lettuce".to_owned(),
        };
        assert_eq!(item, Ok(want));
    }

    #[test]
    fn new_accepts_free_items() {
        let item = MenuItem::new("Water", "Drinks", 0.0, "");

        assert!(item.is_ok());
    }

    #[test]
    fn new_fails_on_empty_name() {
        let item = MenuItem::new("  ", "Drinks", 1.0, "");

        assert!(matches!(item, Err(Error::InvalidMenuItem(_))));
    }

    #[test]
    fn new_fails_on_empty_category() {
        let item = MenuItem::new("Soda", "", 1.0, "");

        assert!(matches!(item, Err(Error::InvalidMenuItem(_))));
    }

    #[test]
    fn new_fails_on_negative_price() {
        let item = MenuItem::new("Soda", "Drinks", -0.5, "");

        assert!(matches!(item, Err(Error::InvalidMenuItem(_))));
    }

    #[test]
    fn new_fails_on_nan_price() {
        let item = MenuItem::new("Soda", "Drinks", f64::NAN, "");

        assert!(matches!(item, Err(Error::InvalidMenuItem(_))));
    }
}
