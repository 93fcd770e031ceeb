//! First-time visitor onboarding: the form, its validation, the persisted
//! completion flag and the middleware that enforces it.

mod guard;
mod page;
mod state;
mod validation;

pub use guard::{onboarding_guard, onboarding_guard_hx};
pub use page::{complete_onboarding_endpoint, get_onboarding_page, validate_onboarding_endpoint};
pub use state::{is_onboarding_completed, mark_onboarding_completed};
pub use validation::{OnboardingForm, is_valid_email, is_valid_name};
