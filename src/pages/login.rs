//! Login form.

use serde::Deserialize;

use crate::services::auth::{AuthAdapter, SignInEmail, SignedIn};

use super::signup::ALL_FIELDS_REQUIRED;
use super::{LOGIN_PATH, SIGNUP_PATH, error_banner, escape_html, layout, render};

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login.html");

pub const SIGNIN_FAILED: &str = "Failed to sign in";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginView {
    pub email: String,
    pub error: Option<String>,
}

impl LoginView {
    #[must_use]
    pub fn render(&self) -> String {
        let body = render(
            LOGIN_TEMPLATE,
            &[
                ("LOGIN_PATH", LOGIN_PATH),
                ("SIGNUP_PATH", SIGNUP_PATH),
                ("EMAIL", &escape_html(&self.email)),
                ("ERROR", &error_banner(self.error.as_deref())),
            ],
        );
        layout("Sign in", "", &body)
    }
}

#[derive(Debug)]
pub enum LoginOutcome {
    Completed(SignedIn),
    Rejected(LoginView),
}

/// Run one login submission.
pub async fn submit(auth: &dyn AuthAdapter, form: LoginForm, user_agent: Option<String>) -> LoginOutcome {
    let mut view = LoginView { email: form.email.clone(), error: None };
    if form.email.is_empty() || form.password.is_empty() {
        view.error = Some(ALL_FIELDS_REQUIRED.to_owned());
        return LoginOutcome::Rejected(view);
    }

    match auth
        .sign_in_email(SignInEmail { email: form.email, password: form.password, user_agent })
        .await
    {
        Ok(signed_in) => LoginOutcome::Completed(signed_in),
        Err(e) => {
            if e.is_internal() {
                tracing::error!(error = %e, "sign-in failed");
            }
            view.error = Some(e.user_message().unwrap_or_else(|| SIGNIN_FAILED.to_owned()));
            LoginOutcome::Rejected(view)
        }
    }
}
