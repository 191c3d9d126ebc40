use std::sync::Arc;

use super::test_support::{get, post_form};
use super::*;
use crate::state::test_helpers::{MemoryAuthAdapter, test_app_state};

fn router() -> (Router, Arc<MemoryAuthAdapter>) {
    let adapter = Arc::new(MemoryAuthAdapter::new());
    (app(test_app_state(adapter.clone())), adapter)
}

#[tokio::test]
async fn healthz_returns_ok() {
    let (app, _) = router();
    let resp = get(&app, "/healthz", None).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = router();
    let resp = get(&app, "/nope", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn signup_onboarding_dashboard_logout_journey() {
    let (app, adapter) = router();

    let resp = post_form(&app, "/signup", "name=Metro&email=metro%40example.com&password=boomin123", None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/onboarding"));
    let token = resp.session_cookie().expect("session cookie set");

    let resp = get(&app, "/onboarding", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Welcome to UNRLSD"));

    let resp = post_form(&app, "/onboarding", "toggle=beatmaker", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<input type="hidden" name="role" value="beatmaker">"#));

    let resp = post_form(&app, "/onboarding", "role=beatmaker&intent=continue", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/dashboard"));

    let resp = get(&app, "/dashboard", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Welcome back, Metro"));
    assert!(resp.body.contains("metro@example.com"));

    let resp = post_form(&app, "/logout", "", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert_eq!(resp.session_cookie().as_deref(), Some(""));
    assert_eq!(adapter.session_count(), 0);

    let resp = get(&app, "/dashboard", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));
}
