//! The onboarding page where a first-time visitor enters their first name and
//! email before they can use the rest of the app.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::ALERT_CONTAINER_SELECTOR,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        brand_header, loading_spinner,
    },
    onboarding::{
        OnboardingForm, is_onboarding_completed, is_valid_email, is_valid_name,
        mark_onboarding_completed,
    },
    storage::{KeyValueStore, StorageKey},
};

const STATUS_ID: &str = "onboarding-status";

pub const INVALID_FORM_MSG: &str = "Enter your first name and a valid email to continue.";

/// The state needed for onboarding.
#[derive(Debug, Clone)]
pub struct OnboardingState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OnboardingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the onboarding page, or send users who have already onboarded to
/// their profile.
pub async fn get_onboarding_page(State(state): State<OnboardingState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match is_onboarding_completed(&*connection) {
        Ok(true) => Redirect::to(endpoints::PROFILE_VIEW).into_response(),
        Ok(false) => onboarding_view(&OnboardingForm::default()).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Check the onboarding form as the user types.
///
/// Returns the status fragment with field hints and the Next button, which is
/// only enabled when both fields are valid.
pub async fn validate_onboarding_endpoint(Form(form): Form<OnboardingForm>) -> Markup {
    onboarding_status(&form, None)
}

/// Complete onboarding.
///
/// The form is checked again here since the client cannot be trusted to have
/// disabled the Next button. On success the first name and email are saved to
/// the profile, the onboarding flag is set, and the client is redirected to
/// the profile page. An invalid form is returned with an error message.
pub async fn complete_onboarding_endpoint(
    State(state): State<OnboardingState>,
    Form(form): Form<OnboardingForm>,
) -> Response {
    if !form.is_valid() {
        return onboarding_form(&form, Some(INVALID_FORM_MSG)).into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    // The flag goes last so a failed write leaves the user on this page.
    let result = connection
        .set(StorageKey::FirstName, form.first_name.trim())
        .and_then(|_| connection.set(StorageKey::Email, &form.email))
        .and_then(|_| mark_onboarding_completed(&*connection));

    match result {
        Ok(()) => {
            tracing::info!("Onboarding completed");
            (
                HxRedirect(endpoints::PROFILE_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not complete onboarding: {error}");
            error.into_alert_response()
        }
    }
}

fn onboarding_view(form: &OnboardingForm) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            (brand_header())

            div class="w-full bg-white rounded-lg shadow dark:border dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl"
                    {
                        "Let us get to know you"
                    }

                    (onboarding_form(form, None))
                }
            }
        }
    };

    base("Welcome", &content)
}

fn onboarding_form(form: &OnboardingForm, error_message: Option<&str>) -> Markup {
    html! {
        form
            id="onboarding-form"
            hx-post=(endpoints::ONBOARDING_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error=(ALERT_CONTAINER_SELECTOR)
            hx-indicator="#indicator"
            class="space-y-4 md:space-y-6"
        {
            div
                hx-post=(endpoints::ONBOARDING_VALIDATE_API)
                hx-trigger="input"
                hx-target={ "#" (STATUS_ID) }
                hx-swap="outerHTML"
                class="space-y-4"
            {
                div
                {
                    label for="first-name" class=(FORM_LABEL_STYLE) { "First Name" }

                    input
                        type="text"
                        name="first_name"
                        id="first-name"
                        value=(form.first_name)
                        autocomplete="given-name"
                        autofocus
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                    input
                        type="email"
                        name="email"
                        id="email"
                        value=(form.email)
                        autocomplete="email"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            (onboarding_status(form, error_message))
        }
    }
}

fn onboarding_status(form: &OnboardingForm, error_message: Option<&str>) -> Markup {
    let name_hint = (!form.first_name.is_empty() && !is_valid_name(&form.first_name))
        .then_some("Your first name may only contain letters and spaces.");
    let email_hint = (!form.email.is_empty() && !is_valid_email(&form.email))
        .then_some("Enter an email like name@example.com.");

    html! {
        div id=(STATUS_ID) class="space-y-4"
        {
            @if let Some(error_message) = error_message {
                p class="text-red-500 text-base" { (error_message) }
            }

            @for hint in [name_hint, email_hint].into_iter().flatten() {
                p class="text-sm text-red-500" { (hint) }
            }

            button
                type="submit"
                id="submit-button"
                disabled[!form.is_valid()]
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Next"
            }
        }
    }
}

#[cfg(test)]
mod onboarding_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        endpoints,
        onboarding::{OnboardingForm, mark_onboarding_completed},
        test_utils::{
            assert_hx_post, assert_required_input, assert_valid_html, must_get_form,
            parse_html_document,
        },
    };

    use super::{OnboardingState, get_onboarding_page};

    fn get_state() -> (OnboardingState, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            OnboardingState {
                db_connection: connection.clone(),
            },
            connection,
        )
    }

    #[tokio::test]
    async fn renders_onboarding_form() {
        let (state, _) = get_state();

        let response = get_onboarding_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_post(&form, endpoints::ONBOARDING_API);
        assert_required_input(&form, "first_name", "text");
        assert_required_input(&form, "email", "email");
    }

    #[tokio::test]
    async fn next_button_starts_disabled() {
        let (state, _) = get_state();

        let response = get_onboarding_page(State(state)).await;

        let document = parse_html_document(response).await;
        let button = document
            .select(&Selector::parse("#submit-button").unwrap())
            .next()
            .expect("No submit button found");
        assert!(button.value().attr("disabled").is_some());
    }

    #[tokio::test]
    async fn fields_are_validated_on_input() {
        let (state, _) = get_state();

        let response = get_onboarding_page(State(state)).await;

        let document = parse_html_document(response).await;
        let validator = document
            .select(&Selector::parse("[hx-trigger=input]").unwrap())
            .next()
            .expect("No element validates on input");
        assert_hx_post(&validator, endpoints::ONBOARDING_VALIDATE_API);
    }

    #[tokio::test]
    async fn onboarded_user_is_redirected_to_profile() {
        let (state, connection) = get_state();
        mark_onboarding_completed(&*connection.lock().unwrap()).unwrap();

        let response = get_onboarding_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::PROFILE_VIEW
        );
    }

    #[test]
    fn default_form_is_invalid() {
        assert!(!OnboardingForm::default().is_valid());
    }
}

#[cfg(test)]
mod validate_onboarding_tests {
    use axum::Form;
    use scraper::{Html, Selector};

    use crate::onboarding::OnboardingForm;

    use super::validate_onboarding_endpoint;

    fn form(first_name: &str, email: &str) -> OnboardingForm {
        OnboardingForm {
            first_name: first_name.to_owned(),
            email: email.to_owned(),
        }
    }

    async fn validate(first_name: &str, email: &str) -> Html {
        let markup = validate_onboarding_endpoint(Form(form(first_name, email))).await;

        Html::parse_fragment(&markup.into_string())
    }

    fn is_button_disabled(html: &Html) -> bool {
        html.select(&Selector::parse("button").unwrap())
            .next()
            .expect("No button found")
            .value()
            .attr("disabled")
            .is_some()
    }

    fn hints(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn valid_form_enables_next() {
        let html = validate("Tilly", "tilly@example.com").await;

        assert!(!is_button_disabled(&html));
        assert!(hints(&html).is_empty());
    }

    #[tokio::test]
    async fn invalid_name_disables_next_with_hint() {
        let html = validate("Tilly3", "tilly@example.com").await;

        assert!(is_button_disabled(&html));
        assert_eq!(hints(&html).len(), 1);
    }

    #[tokio::test]
    async fn invalid_email_disables_next_with_hint() {
        let html = validate("Tilly", "tilly@example").await;

        assert!(is_button_disabled(&html));
        assert_eq!(hints(&html).len(), 1);
    }

    #[tokio::test]
    async fn empty_fields_disable_next_without_hints() {
        let html = validate("", "").await;

        assert!(is_button_disabled(&html));
        assert!(hints(&html).is_empty());
    }
}
