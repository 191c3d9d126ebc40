//! Placeholder dashboard shown to signed-in users.

use crate::services::session::SessionUser;

use super::{LOGOUT_PATH, escape_html, layout, render};

const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

#[must_use]
pub fn render_dashboard(user: &SessionUser) -> String {
    let body = render(
        DASHBOARD_TEMPLATE,
        &[
            ("NAME", &escape_html(user.display_name())),
            ("EMAIL", &escape_html(&user.email)),
            ("LOGOUT_PATH", LOGOUT_PATH),
        ],
    );
    layout("Dashboard", "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(name: &str) -> SessionUser {
        SessionUser { id: Uuid::nil(), name: name.into(), email: "metro@example.com".into(), email_verified: true }
    }

    #[test]
    fn greets_user_by_name_with_email() {
        let html = render_dashboard(&user("Metro"));
        assert!(html.contains("Welcome back, Metro"));
        assert!(html.contains("metro@example.com"));
        assert!(html.contains(r#"action="/logout""#));
    }

    #[test]
    fn falls_back_to_default_name() {
        let html = render_dashboard(&user(""));
        assert!(html.contains("Welcome back, User"));
    }

    #[test]
    fn escapes_name() {
        let html = render_dashboard(&user("<i>x</i>"));
        assert!(html.contains("Welcome back, &lt;i&gt;x&lt;/i&gt;"));
    }
}
