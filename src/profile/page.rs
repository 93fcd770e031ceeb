//! The profile page for editing contact details and notification preferences.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::{ALERT_CONTAINER_SELECTOR, Alert},
    endpoints,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner,
    },
    navigation::NavBar,
    profile::{ProfileForm, UserProfile, load_profile, save_profile},
};

const AVATAR_ID: &str = "avatar";

/// Matches the `(000) 000-0000` phone mask.
const PHONE_PATTERN: &str = r"\(\d{3}\) \d{3}-\d{4}";

/// The state needed for the profile page.
#[derive(Debug, Clone)]
pub struct ProfileState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the profile page filled in with the saved profile.
pub async fn get_profile_page(State(state): State<ProfileState>) -> Response {
    let profile = match state.db_connection.lock() {
        Ok(connection) => load_profile(&*connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    profile_view(&profile).into_response()
}

/// Save the profile form and respond with an alert saying whether it worked.
///
/// On success the avatar is also swapped out so the initials follow the new
/// names.
pub async fn save_profile_endpoint(
    State(state): State<ProfileState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let profile = UserProfile::from(form);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = save_profile(&profile, &*connection) {
        tracing::error!("Could not save profile: {error}");
        return error.into_alert_response();
    }

    tracing::info!("Profile saved");

    html! {
        (Alert::success("Changes saved", "Your profile has been updated.").into_html())
        (avatar_view(&profile, true))
    }
    .into_response()
}

fn profile_view(profile: &UserProfile) -> Markup {
    let nav_bar = NavBar::new(endpoints::PROFILE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md mb-24 lg:mb-0 space-y-6"
            {
                h1 class="text-2xl font-bold" { "Personal information" }

                (avatar_view(profile, false))

                (profile_form(profile))

                button
                    type="button"
                    id="log-out-button"
                    hx-post=(endpoints::LOG_OUT)
                    hx-target-error=(ALERT_CONTAINER_SELECTOR)
                    hx-confirm="Log out? This removes your details from this device."
                    class=(BUTTON_DANGER_STYLE)
                {
                    "Log out"
                }
            }
        }
    };

    base("Profile", &content)
}

fn avatar_view(profile: &UserProfile, swap_oob: bool) -> Markup {
    html! {
        div
            id=(AVATAR_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="flex items-center gap-4"
        {
            @if let Some(avatar_uri) = &profile.avatar_uri {
                img
                    src=(avatar_uri)
                    alt="Avatar"
                    class="w-20 h-20 rounded-full object-cover";
            } @else {
                div
                    class="flex items-center justify-center w-20 h-20 rounded-full
                        bg-[#495E57] text-2xl font-bold text-white"
                {
                    (profile.initials())
                }
            }
        }
    }
}

fn text_input(label: &str, name: &str, type_: &str, value: &str, autocomplete: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(type_)
                name=(name)
                id=(name)
                value=(value)
                autocomplete=(autocomplete)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-x-3"
        {
            input
                type="checkbox"
                name=(name)
                id=(name)
                checked[checked]
                class=(FORM_CHECKBOX_STYLE);

            label for=(name) class="text-sm font-medium" { (label) }
        }
    }
}

fn profile_form(profile: &UserProfile) -> Markup {
    html! {
        form
            hx-post=(endpoints::PROFILE_API)
            hx-target=(ALERT_CONTAINER_SELECTOR)
            hx-target-error=(ALERT_CONTAINER_SELECTOR)
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4"
        {
            (text_input("First Name", "first_name", "text", &profile.first_name, "given-name"))
            (text_input("Last Name", "last_name", "text", &profile.last_name, "family-name"))
            (text_input("Email", "email", "email", &profile.email, "email"))

            div
            {
                label for="phone_number" class=(FORM_LABEL_STYLE) { "Phone Number" }

                input
                    type="tel"
                    name="phone_number"
                    id="phone_number"
                    value=(profile.phone_number)
                    placeholder="(000) 000-0000"
                    pattern=(PHONE_PATTERN)
                    title="A phone number like (555) 123-4567"
                    autocomplete="tel-national"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (text_input(
                "Avatar URL",
                "avatar_uri",
                "url",
                profile.avatar_uri.as_deref().unwrap_or_default(),
                "photo",
            ))

            fieldset class="space-y-2"
            {
                legend class="mb-2 text-lg font-semibold" { "Email notifications" }

                (checkbox("Promotions", "promotions", profile.promotions))
                (checkbox("News", "news", profile.news))
                (checkbox("Special offers", "offers", profile.offers))
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                "Save changes"
            }
        }
    }
}
