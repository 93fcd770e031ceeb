//! The user's profile: contact details and notification preferences kept in
//! the key-value store, and the page for editing them.

mod domain;
mod page;
mod persistence;

pub use domain::{ProfileForm, UserProfile};
pub use page::{get_profile_page, save_profile_endpoint};
pub use persistence::{load_profile, logout, save_profile};
