//! The restaurant menu: listing categories, filtering dishes and the home page.

mod db;
mod domain;
mod home_page;
mod query;
mod schema;

pub use db::{create_menu_table, filter_menu, get_categories, insert_menu_item};
pub use domain::{Category, MenuItem};
pub use home_page::{SEARCH_DEBOUNCE, get_home_page, get_menu_list};
pub use query::FilterCriteria;
