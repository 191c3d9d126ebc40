//! Server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page module owns the view state for one route (form fields, error
//! text, selected roles) and renders it into an HTML template from
//! `templates/`. Route handlers decide what state to build; pages decide how
//! it looks.
//!
//! Templates use `{{KEY}}` placeholders. Substitution is single-pass, so a
//! value that happens to contain `{{...}}` is never expanded again. Values
//! built from user input must go through [`escape_html`] first.

pub mod dashboard;
pub mod gate;
pub mod home;
pub mod login;
pub mod onboarding;
pub mod signup;

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");
const LOADING_TEMPLATE: &str = include_str!("../../templates/loading.html");
const ERROR_TEMPLATE: &str = include_str!("../../templates/error.html");

pub const HOME_PATH: &str = "/";
pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const ONBOARDING_PATH: &str = "/onboarding";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// Escape text for use in HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace `{{KEY}}` placeholders in one pass. Unknown keys are left as-is.
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Wrap a page body in the shared document shell.
#[must_use]
pub fn layout(title: &str, head_extra: &str, body: &str) -> String {
    render(LAYOUT_TEMPLATE, &[("TITLE", &escape_html(title)), ("HEAD_EXTRA", head_extra), ("BODY", body)])
}

/// Shown while the session lookup is still pending; reloads itself.
#[must_use]
pub fn loading_page(refresh_secs: u64) -> String {
    let refresh = format!(r#"<meta http-equiv="refresh" content="{refresh_secs}">"#);
    layout("Loading", &refresh, LOADING_TEMPLATE)
}

/// Generic failure page. `message` is escaped.
#[must_use]
pub fn error_page(message: &str) -> String {
    let body = render(ERROR_TEMPLATE, &[("MESSAGE", &escape_html(message)), ("HOME_PATH", HOME_PATH)]);
    layout("Something went wrong", "", &body)
}

/// Inline error box, or nothing when there is no error.
#[must_use]
pub(crate) fn error_banner(error: Option<&str>) -> String {
    error.map_or_else(String::new, |msg| {
        format!(r#"<div class="alert" role="alert">{}</div>"#, escape_html(msg))
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
