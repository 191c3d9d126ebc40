//! Email/password auth adapter.
//!
//! ARCHITECTURE
//! ============
//! Pages and the JSON API talk to an `AuthAdapter` trait object held in
//! `AppState`. `PgAuthAdapter` is the production implementation over the
//! `users`, `accounts` and `sessions` tables; tests substitute an in-memory
//! adapter so handlers run without a live database.

use async_trait::async_trait;
use sqlx::PgPool;

use super::account;
use super::password::{self, PasswordError};
use super::session::{self, Session, SessionUser};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password too short")]
    PasswordTooShort,
    #[error("Password too long")]
    PasswordTooLong,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("password error: {0}")]
    Password(#[from] PasswordError),
}

impl AuthError {
    /// Stable machine-readable code for JSON responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::PasswordTooLong => "PASSWORD_TOO_LONG",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_EMAIL_OR_PASSWORD",
            Self::Db(_) | Self::Password(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show the user. Infrastructure failures have none.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Db(_) | Self::Password(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Whether the failure is infrastructure rather than user input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Db(_) | Self::Password(_))
    }
}

#[derive(Debug, Clone)]
pub struct SignUpEmail {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignInEmail {
    pub email: String,
    pub password: String,
    pub user_agent: Option<String>,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: String,
    pub session: Session,
}

/// Provider-neutral auth operations. Enables mocking in tests.
#[async_trait]
pub trait AuthAdapter: Send + Sync {
    /// Create a user with a password credential.
    async fn sign_up_email(&self, request: SignUpEmail) -> Result<SessionUser, AuthError>;

    /// Verify credentials and issue a new session.
    async fn sign_in_email(&self, request: SignInEmail) -> Result<SignedIn, AuthError>;

    /// Resolve a session token; expired or unknown tokens yield `None`.
    async fn get_session(&self, token: &str) -> Result<Option<Session>, AuthError>;

    /// Destroy a session. Unknown tokens are not an error.
    async fn sign_out(&self, token: &str) -> Result<(), AuthError>;
}

/// Postgres-backed adapter.
pub struct PgAuthAdapter {
    pool: PgPool,
    session_ttl: time::Duration,
}

impl PgAuthAdapter {
    #[must_use]
    pub fn new(pool: PgPool, session_ttl: time::Duration) -> Self {
        Self { pool, session_ttl }
    }
}

#[async_trait]
impl AuthAdapter for PgAuthAdapter {
    async fn sign_up_email(&self, request: SignUpEmail) -> Result<SessionUser, AuthError> {
        let new_account = account::validate_new_account(&request.name, &request.email, &request.password)?;
        let password_hash = password::hash_blocking(request.password).await?;
        let user = account::insert_user_with_credential(&self.pool, &new_account, &password_hash).await?;
        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    async fn sign_in_email(&self, request: SignInEmail) -> Result<SignedIn, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let email = account::normalize_email(&request.email).ok_or(AuthError::InvalidEmail)?;

        let Some(credential) = account::find_credential(&self.pool, &email).await? else {
            password::verify_dummy_blocking(request.password).await?;
            return Err(AuthError::InvalidCredentials);
        };
        if !password::verify_blocking(request.password, credential.password_hash).await? {
            tracing::info!(user_id = %credential.user.id, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = session::create_session(
            &self.pool,
            credential.user.id,
            self.session_ttl,
            request.user_agent.as_deref(),
        )
        .await?;
        tracing::info!(user_id = %credential.user.id, "session created");

        Ok(SignedIn { token: issued.token, session: Session { session: issued.info, user: credential.user } })
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(session::validate_session(&self.pool, token).await?)
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        session::delete_session(&self.pool, token).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
