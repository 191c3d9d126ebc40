//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the server-rendered pages and the JSON auth API under a
//! single Axum router. Every request gets a `tower-http` trace span.

pub mod auth;
pub mod pages;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::pages::{DASHBOARD_PATH, HOME_PATH, LOGIN_PATH, LOGOUT_PATH, ONBOARDING_PATH, SIGNUP_PATH};
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(HOME_PATH, get(pages::home_page))
        .route(SIGNUP_PATH, get(pages::signup_page).post(pages::signup_submit))
        .route(LOGIN_PATH, get(pages::login_page).post(pages::login_submit))
        .route(ONBOARDING_PATH, get(pages::onboarding_page).post(pages::onboarding_submit))
        .route(DASHBOARD_PATH, get(pages::dashboard_page))
        .route(LOGOUT_PATH, post(pages::logout))
        .route("/api/auth/sign-up/email", post(auth::sign_up_email))
        .route("/api/auth/sign-in/email", post(auth::sign_in_email))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/get-session", get(auth::get_session))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST SUPPORT
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
