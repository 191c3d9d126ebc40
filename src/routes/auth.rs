//! Auth routes: JSON sign-up/sign-in/sign-out/session endpoints and the
//! session cookie helpers shared with page routes.

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::services::auth::{AuthError, SignInEmail, SignUpEmail, SignedIn};
use crate::services::session::{Session, SessionInfo, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

// =============================================================================
// COOKIE HELPERS
// =============================================================================

pub(crate) fn session_cookie(config: &AppConfig, token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(config.session_ttl)
        .build()
}

pub(crate) fn cleared_session_cookie(config: &AppConfig) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::ZERO)
        .build()
}

pub(crate) fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

// =============================================================================
// ERRORS
// =============================================================================

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingFields
        | AuthError::InvalidEmail
        | AuthError::PasswordTooShort
        | AuthError::PasswordTooLong => StatusCode::BAD_REQUEST,
        AuthError::UserAlreadyExists => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Db(_) | AuthError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// JSON error response for the auth API.
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = auth_error_to_status(&self.0);
        if self.0.is_internal() {
            tracing::error!(error = %self.0, "auth api failure");
        }
        let message = self
            .0
            .user_message()
            .unwrap_or_else(|| "Internal server error".to_owned());
        (status, Json(ErrorBody { code: self.0.code(), message })).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct SignedInBody {
    token: String,
    session: SessionInfo,
    user: SessionUser,
}

fn signed_in_response(config: &AppConfig, jar: CookieJar, signed_in: SignedIn) -> Response {
    let SignedIn { token, session: Session { session, user } } = signed_in;
    let jar = jar.add(session_cookie(config, token.clone()));
    (jar, Json(SignedInBody { token, session, user })).into_response()
}

/// `POST /api/auth/sign-up/email`: create the account and sign it in.
pub async fn sign_up_email(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<SignUpBody>,
) -> Result<Response, ApiError> {
    state
        .auth
        .sign_up_email(SignUpEmail { name: body.name, email: body.email.clone(), password: body.password.clone() })
        .await?;
    let signed_in = state
        .auth
        .sign_in_email(SignInEmail { email: body.email, password: body.password, user_agent: user_agent(&headers) })
        .await?;
    Ok(signed_in_response(&state.config, jar, signed_in))
}

/// `POST /api/auth/sign-in/email`: verify credentials, set the session cookie.
pub async fn sign_in_email(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<SignInBody>,
) -> Result<Response, ApiError> {
    let signed_in = state
        .auth
        .sign_in_email(SignInEmail { email: body.email, password: body.password, user_agent: user_agent(&headers) })
        .await?;
    Ok(signed_in_response(&state.config, jar, signed_in))
}

/// `POST /api/auth/sign-out`: delete the session (if any) and clear the cookie.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    if let Some(token) = session_token(&jar) {
        state.auth.sign_out(&token).await?;
    }
    let jar = jar.add(cleared_session_cookie(&state.config));
    Ok((jar, Json(serde_json::json!({ "success": true }))).into_response())
}

/// `GET /api/auth/get-session`: current session and user, or `null`.
pub async fn get_session(State(state): State<AppState>, jar: CookieJar) -> Result<Json<Option<Session>>, ApiError> {
    let Some(token) = session_token(&jar) else {
        return Ok(Json(None));
    };
    Ok(Json(state.auth.get_session(&token).await?))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
