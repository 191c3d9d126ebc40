//! Page routes: render HTML views and handle form posts.
//!
//! Gated pages (dashboard, onboarding) resolve the session first and either
//! redirect to `/login`, render the loading view, or continue with the user.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::{Form, FormRejection};
use axum_extra::extract::cookie::CookieJar;

use super::auth::{cleared_session_cookie, session_cookie, session_token, user_agent};
use crate::pages::gate::{self, GateDecision};
use crate::pages::login::{LoginForm, LoginOutcome, LoginView};
use crate::pages::onboarding::{OnboardingForm, OnboardingStep, OnboardingView};
use crate::pages::signup::{SignupForm, SignupOutcome, SignupView};
use crate::pages::{
    DASHBOARD_PATH, HOME_PATH, ONBOARDING_PATH, dashboard, error_page, home, loading_page, login, signup,
};
use crate::services::session::SessionUser;
use crate::state::AppState;

const LOADING_REFRESH_SECS: u64 = 1;
const SESSION_UNAVAILABLE: &str = "We couldn't verify your session. Please try again.";

/// Run the session gate, yielding the user or the response to send instead.
async fn require_user(state: &AppState, jar: &CookieJar) -> Result<SessionUser, Response> {
    let token = session_token(jar);
    let status = match gate::lookup(state.auth.as_ref(), token.as_deref(), state.config.session_lookup_timeout).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(SESSION_UNAVAILABLE))).into_response());
        }
    };

    match status.decide() {
        GateDecision::Render(user) => Ok(user),
        GateDecision::Redirect(path) => Err(Redirect::to(path).into_response()),
        GateDecision::Loading => Err(Html(loading_page(LOADING_REFRESH_SECS)).into_response()),
    }
}

/// `GET /`: marketing landing page.
pub async fn home_page() -> Html<String> {
    Html(home::render_home(time::OffsetDateTime::now_utc().year()))
}

/// `GET /signup`
pub async fn signup_page() -> Html<String> {
    Html(SignupView::default().render())
}

/// `POST /signup`: validate, sign up, sign in, then continue to onboarding.
pub async fn signup_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Response {
    match signup::submit(state.auth.as_ref(), form, user_agent(&headers)).await {
        SignupOutcome::Completed(signed_in) => {
            let jar = jar.add(session_cookie(&state.config, signed_in.token));
            (jar, Redirect::to(ONBOARDING_PATH)).into_response()
        }
        SignupOutcome::Rejected(view) => Html(view.render()).into_response(),
    }
}

/// `GET /login`
pub async fn login_page() -> Html<String> {
    Html(LoginView::default().render())
}

/// `POST /login`: sign in and continue to the dashboard.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    match login::submit(state.auth.as_ref(), form, user_agent(&headers)).await {
        LoginOutcome::Completed(signed_in) => {
            let jar = jar.add(session_cookie(&state.config, signed_in.token));
            (jar, Redirect::to(DASHBOARD_PATH)).into_response()
        }
        LoginOutcome::Rejected(view) => Html(view.render()).into_response(),
    }
}

/// `GET /onboarding`: gated role selector.
pub async fn onboarding_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    match require_user(&state, &jar).await {
        Ok(_) => Html(OnboardingView::default().render()).into_response(),
        Err(response) => response,
    }
}

/// `POST /onboarding`: toggle a role or continue to the dashboard.
///
/// The session is checked before the body is decoded, so a visitor without
/// one is redirected even when the form is malformed.
pub async fn onboarding_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<OnboardingForm>, FormRejection>,
) -> Response {
    let user = match require_user(&state, &jar).await {
        Ok(user) => user,
        Err(response) => return response,
    };
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return rejection.into_response(),
    };

    match form.apply() {
        OnboardingStep::Show(view) => Html(view.render()).into_response(),
        OnboardingStep::Complete(roles) => {
            // TODO: persist roles once profile storage exists; until then they are only logged.
            tracing::info!(user_id = %user.id, roles = ?roles, "onboarding roles selected");
            Redirect::to(DASHBOARD_PATH).into_response()
        }
    }
}

/// `GET /dashboard`: gated placeholder dashboard.
pub async fn dashboard_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    match require_user(&state, &jar).await {
        Ok(user) => Html(dashboard::render_dashboard(&user)).into_response(),
        Err(response) => response,
    }
}

/// `POST /logout`: end the session and return to the landing page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        if let Err(e) = state.auth.sign_out(&token).await {
            tracing::warn!(error = %e, "sign-out failed; clearing cookie anyway");
        }
    }
    let jar = jar.add(cleared_session_cookie(&state.config));
    (jar, Redirect::to(HOME_PATH)).into_response()
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
