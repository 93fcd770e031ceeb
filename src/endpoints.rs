//! The API endpoints URIs.

/// The root route which redirects to the profile or onboarding page.
pub const ROOT: &str = "/";
/// The page for first-time visitors to enter their name and email.
pub const ONBOARDING_VIEW: &str = "/onboarding";
/// The page for editing contact details and notification preferences.
pub const PROFILE_VIEW: &str = "/profile";
/// The page that lists the menu.
pub const HOME_VIEW: &str = "/home";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for images and other static files.
pub const STATIC: &str = "/static";
/// The Little Lemon logo.
pub const LOGO: &str = "/static/little-lemon.svg";

/// The route for checking the onboarding form as the user types.
pub const ONBOARDING_VALIDATE_API: &str = "/api/onboarding/validate";
/// The route for completing onboarding.
pub const ONBOARDING_API: &str = "/api/onboarding";
/// The route for saving the user's profile.
pub const PROFILE_API: &str = "/api/profile";
/// The route for the client to log out, wiping all stored data.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for getting the list of menu items that match a filter.
pub const MENU_API: &str = "/api/menu";
