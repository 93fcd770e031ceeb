//! Builds the SQL query for filtering the menu.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::menu::{
    Category,
    schema::{MENU_TABLE, MenuColumn, select_columns},
};

/// Which menu items to show.
///
/// An empty category set means "any category", and an empty search term
/// means "any name".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// The selected categories, an item must belong to one of these.
    pub categories: BTreeSet<Category>,
    /// A substring that an item's name must contain, ignoring ASCII case.
    pub search_term: String,
}

impl FilterCriteria {
    /// Create filter criteria, dropping duplicate categories.
    pub fn new(categories: impl IntoIterator<Item = Category>, search_term: &str) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            search_term: search_term.to_owned(),
        }
    }

    /// Whether the criteria match every item on the menu.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.search_term.is_empty()
    }

    /// Whether `category` is one of the selected categories.
    pub fn is_selected(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    /// Remove selected categories that are not in `known_categories`.
    ///
    /// Returns the categories that were removed.
    pub fn retain_known(&mut self, known_categories: &[Category]) -> Vec<Category> {
        let (kept, removed): (BTreeSet<_>, BTreeSet<_>) = std::mem::take(&mut self.categories)
            .into_iter()
            .partition(|category| known_categories.contains(category));

        self.categories = kept;

        removed.into_iter().collect()
    }
}

/// A parameterized SELECT statement and the values to bind to it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MenuQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Build the query that selects the items matching `criteria`.
///
/// Every user supplied value is bound as a parameter, the SQL text only ever
/// contains placeholders and column names. Rows are ordered by insertion.
pub(super) fn build_filter_query(criteria: &FilterCriteria) -> MenuQuery {
    let mut where_clauses = Vec::new();
    let mut params = Vec::new();

    if !criteria.categories.is_empty() {
        let placeholders = criteria
            .categories
            .iter()
            .map(|category| {
                params.push(category.as_ref().to_owned());
                format!("?{}", params.len())
            })
            .collect::<Vec<_>>()
            .join(", ");

        where_clauses.push(format!("{} IN ({placeholders})", MenuColumn::Category));
    }

    if !criteria.search_term.is_empty() {
        params.push(escape_like(&criteria.search_term));
        // LIKE ignores ASCII case only, so "cafe" does not match "CAFÉ".
        where_clauses.push(format!(
            "{} LIKE '%' || ?{} || '%' ESCAPE '\\'",
            MenuColumn::Name,
            params.len()
        ));
    }

    let where_clause = if where_clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_clauses.join(" AND "))
    };

    MenuQuery {
        sql: format!(
            "SELECT {} FROM {MENU_TABLE}{where_clause} ORDER BY rowid ASC;",
            select_columns()
        ),
        params,
    }
}

/// Escape the LIKE wildcards in `term` so they match literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for character in term.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(character);
    }

    escaped
}

#[cfg(test)]
mod build_filter_query_tests {
    use crate::menu::Category;

    use super::{FilterCriteria, MenuQuery, build_filter_query, escape_like};

    #[test]
    fn empty_criteria_selects_everything() {
        let query = build_filter_query(&FilterCriteria::default());

        assert_eq!(
            query,
            MenuQuery {
                sql: "SELECT name, category, price, description FROM menu ORDER BY rowid ASC;"
                    .to_owned(),
                params: vec![],
            }
        );
    }

    #[test]
    fn categories_become_placeholders() {
        let criteria = FilterCriteria::new(
            [Category::new("Mains"), Category::new("Desserts")],
            "",
        );

        let query = build_filter_query(&criteria);

        assert_eq!(
            query.sql,
            "SELECT name, category, price, description FROM menu \
            WHERE category IN (?1, ?2) ORDER BY rowid ASC;"
        );
        // Categories are kept sorted, so the parameter order is stable.
        assert_eq!(query.params, vec!["Desserts", "Mains"]);
    }

    #[test]
    fn search_term_is_bound_not_inlined() {
        let criteria = FilterCriteria::new([], "'; DROP TABLE menu; --");

        let query = build_filter_query(&criteria);

        assert_eq!(
            query.sql,
            "SELECT name, category, price, description FROM menu \
            WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\' ORDER BY rowid ASC;"
        );
        assert_eq!(query.params, vec!["'; DROP TABLE menu; --"]);
    }

    #[test]
    fn categories_and_search_are_combined_with_and() {
        let criteria = FilterCriteria::new([Category::new("Desserts")], "cake");

        let query = build_filter_query(&criteria);

        assert_eq!(
            query.sql,
            "SELECT name, category, price, description FROM menu \
            WHERE category IN (?1) AND name LIKE '%' || ?2 || '%' ESCAPE '\\' \
            ORDER BY rowid ASC;"
        );
        assert_eq!(query.params, vec!["Desserts", "cake"]);
    }

    #[test]
    fn wildcards_in_search_term_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("Cake"), "Cake");
    }

    #[test]
    fn duplicate_categories_are_dropped() {
        let criteria = FilterCriteria::new(
            [Category::new("Drinks"), Category::new("Drinks")],
            "",
        );

        assert_eq!(criteria.categories.len(), 1);
        assert_eq!(build_filter_query(&criteria).params, vec!["Drinks"]);
    }
}
