//! Sign-up form: validation, submission flow and rendering.
//!
//! Submission order is fixed: local validation (no adapter call on failure),
//! then `sign_up_email`, then `sign_in_email` with the same credentials. Any
//! adapter error is shown inline, using its own message when it has one.

use serde::Deserialize;

use crate::services::auth::{AuthAdapter, AuthError, SignInEmail, SignUpEmail, SignedIn};
use crate::services::password::{MIN_PASSWORD_LEN, password_len};

use super::{LOGIN_PATH, SIGNUP_PATH, error_banner, escape_html, layout, render};

const SIGNUP_TEMPLATE: &str = include_str!("../../templates/signup.html");

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const SIGNUP_FAILED: &str = "Failed to create account";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignupForm {
    /// Client-side rules checked before any adapter call.
    ///
    /// # Errors
    ///
    /// Returns the message to display for the first failing rule.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ALL_FIELDS_REQUIRED);
        }
        if password_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(PASSWORD_TOO_SHORT);
        }
        Ok(())
    }
}

/// Everything the sign-up page shows. The password is never echoed back.
///
/// There is no in-flight state: the request itself is the pending period, and
/// every view rendered from [`submit`] is a finished one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupView {
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

impl SignupView {
    fn from_form(form: &SignupForm) -> Self {
        Self { name: form.name.clone(), email: form.email.clone(), error: None }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let body = render(
            SIGNUP_TEMPLATE,
            &[
                ("SIGNUP_PATH", SIGNUP_PATH),
                ("LOGIN_PATH", LOGIN_PATH),
                ("NAME", &escape_html(&self.name)),
                ("EMAIL", &escape_html(&self.email)),
                ("ERROR", &error_banner(self.error.as_deref())),
            ],
        );
        layout("Create an account", "", &body)
    }
}

#[derive(Debug)]
pub enum SignupOutcome {
    /// Account created and signed in; the caller sets the cookie and moves on to onboarding.
    Completed(SignedIn),
    /// Form re-rendered with an error.
    Rejected(SignupView),
}

async fn create_and_sign_in(
    auth: &dyn AuthAdapter,
    form: SignupForm,
    user_agent: Option<String>,
) -> Result<SignedIn, AuthError> {
    auth.sign_up_email(SignUpEmail {
        name: form.name,
        email: form.email.clone(),
        password: form.password.clone(),
    })
    .await?;
    auth.sign_in_email(SignInEmail { email: form.email, password: form.password, user_agent })
        .await
}

/// Run one sign-up submission.
pub async fn submit(auth: &dyn AuthAdapter, form: SignupForm, user_agent: Option<String>) -> SignupOutcome {
    let mut view = SignupView::from_form(&form);
    if let Err(message) = form.validate() {
        view.error = Some(message.to_owned());
        return SignupOutcome::Rejected(view);
    }

    match create_and_sign_in(auth, form, user_agent).await {
        Ok(signed_in) => SignupOutcome::Completed(signed_in),
        Err(e) => {
            if e.is_internal() {
                tracing::error!(error = %e, "sign-up failed");
            } else {
                tracing::info!(code = e.code(), "sign-up rejected");
            }
            view.error = Some(e.user_message().unwrap_or_else(|| SIGNUP_FAILED.to_owned()));
            SignupOutcome::Rejected(view)
        }
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;
