//! Session gate shared by the dashboard and onboarding pages.
//!
//! A gated page asks for the current session and then does exactly one of:
//! show a loading view (lookup still pending), send the visitor to `/login`
//! (no session), or render protected content for the session's user.

use std::time::Duration;

use crate::services::auth::{AuthAdapter, AuthError};
use crate::services::session::{Session, SessionUser};

use super::LOGIN_PATH;

/// Where the session lookup stands when the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    Resolved(Option<Session>),
}

/// What a gated page should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Loading,
    Redirect(&'static str),
    Render(SessionUser),
}

impl SessionStatus {
    #[must_use]
    pub fn decide(self) -> GateDecision {
        match self {
            Self::Pending => GateDecision::Loading,
            Self::Resolved(None) => GateDecision::Redirect(LOGIN_PATH),
            Self::Resolved(Some(session)) => GateDecision::Render(session.user),
        }
    }
}

/// Look up the session for `token`, giving up after `timeout`.
///
/// A missing token resolves to no session without touching the adapter.
///
/// # Errors
///
/// Returns the adapter error if the lookup itself fails.
pub async fn lookup(
    auth: &dyn AuthAdapter,
    token: Option<&str>,
    timeout: Duration,
) -> Result<SessionStatus, AuthError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(SessionStatus::Resolved(None));
    };
    match tokio::time::timeout(timeout, auth.get_session(token)).await {
        Ok(result) => Ok(SessionStatus::Resolved(result?)),
        Err(_) => {
            tracing::warn!(timeout_ms = %timeout.as_millis(), "session lookup still pending");
            Ok(SessionStatus::Pending)
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
