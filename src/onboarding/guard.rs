//! Middleware that keeps users who have not onboarded out of the rest of the app.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, onboarding::is_onboarding_completed};

/// The state needed for the onboarding guard.
#[derive(Debug, Clone)]
pub struct OnboardingGuardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OnboardingGuardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[inline]
async fn onboarding_guard_internal(
    state: OnboardingGuardState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let is_onboarded = match state.db_connection.lock() {
        Ok(connection) => is_onboarding_completed(&*connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    match is_onboarded {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            tracing::debug!(
                "{} requested before onboarding, redirecting",
                request.uri().path()
            );
            get_redirect(endpoints::ONBOARDING_VIEW)
        }
        Err(error) => {
            tracing::error!("Could not read the onboarding flag: {error}");
            get_redirect(endpoints::INTERNAL_ERROR_VIEW)
        }
    }
}

/// Middleware that only lets the request through once the user has completed
/// onboarding, otherwise the client is redirected to the onboarding page.
pub async fn onboarding_guard(
    State(state): State<OnboardingGuardState>,
    request: Request,
    next: Next,
) -> Response {
    onboarding_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Same as [onboarding_guard], but redirects with the `HX-Redirect` header for
/// requests made by htmx.
pub async fn onboarding_guard_hx(
    State(state): State<OnboardingGuardState>,
    request: Request,
    next: Next,
) -> Response {
    onboarding_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
