//! Log-out route handler that wipes everything stored on this device and sends
//! the client back to onboarding.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints, profile::logout};

/// The state needed for logging out.
#[derive(Debug, Clone)]
pub struct LogOutState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Clear the profile and the onboarding flag, then redirect the client to the
/// onboarding page.
pub async fn post_log_out(State(state): State<LogOutState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match logout(&*connection) {
        Ok(()) => {
            tracing::info!("Logged out, stored data cleared");
            (
                HxRedirect(endpoints::ONBOARDING_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not log out: {error}");
            error.into_alert_response()
        }
    }
}
