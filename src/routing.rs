//! Application router configuration with onboarding-guarded and open route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    log_out::post_log_out,
    menu::{get_home_page, get_menu_list},
    not_found::get_404_not_found,
    onboarding::{
        complete_onboarding_endpoint, get_onboarding_page, onboarding_guard, onboarding_guard_hx,
        validate_onboarding_endpoint,
    },
    profile::{get_profile_page, save_profile_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ONBOARDING_VIEW, get(get_onboarding_page))
        .route(
            endpoints::ONBOARDING_VALIDATE_API,
            post(validate_onboarding_endpoint),
        )
        .route(endpoints::ONBOARDING_API, post(complete_onboarding_endpoint))
        .route(endpoints::LOG_OUT, post(post_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::HOME_VIEW, get(get_home_page))
        .route(endpoints::PROFILE_VIEW, get(get_profile_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            onboarding_guard,
        ));

    // Requests made by htmx need the HX-Redirect header for the redirect to onboarding to work.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::MENU_API, get(get_menu_list))
            .route(endpoints::PROFILE_API, post(save_profile_endpoint))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                onboarding_guard_hx,
            )),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' sends onboarded users to their profile.
///
/// Everyone else is sent to onboarding by the guard before reaching this.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::PROFILE_VIEW)
}
