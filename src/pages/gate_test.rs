use super::*;
use crate::services::session::SessionInfo;
use crate::state::test_helpers::MemoryAuthAdapter;
use uuid::Uuid;

fn session(name: &str) -> Session {
    let user = SessionUser { id: Uuid::nil(), name: name.into(), email: "a@b.co".into(), email_verified: false };
    Session { session: SessionInfo { user_id: user.id, expires_at: 0 }, user }
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn pending_renders_loading() {
    assert_eq!(SessionStatus::Pending.decide(), GateDecision::Loading);
}

#[test]
fn absent_session_redirects_to_login() {
    assert_eq!(SessionStatus::Resolved(None).decide(), GateDecision::Redirect("/login"));
}

#[test]
fn present_session_renders_user() {
    let decision = SessionStatus::Resolved(Some(session("Ana"))).decide();
    let GateDecision::Render(user) = decision else {
        panic!("expected render, got {decision:?}");
    };
    assert_eq!(user.name, "Ana");
}

// =============================================================================
// lookup
// =============================================================================

#[tokio::test]
async fn lookup_without_token_is_unauthenticated() {
    let adapter = MemoryAuthAdapter::new().with_failing_lookups();
    let status = lookup(&adapter, None, Duration::from_secs(1)).await.unwrap();
    assert_eq!(status, SessionStatus::Resolved(None));
    let status = lookup(&adapter, Some(""), Duration::from_secs(1)).await.unwrap();
    assert_eq!(status, SessionStatus::Resolved(None));
}

#[tokio::test]
async fn lookup_unknown_token_is_unauthenticated() {
    let adapter = MemoryAuthAdapter::new();
    let status = lookup(&adapter, Some("deadbeef"), Duration::from_secs(1)).await.unwrap();
    assert_eq!(status, SessionStatus::Resolved(None));
}

#[tokio::test]
async fn lookup_known_token_resolves_user() {
    let adapter = MemoryAuthAdapter::new();
    let token = adapter.seed_session("Ana", "ana@example.com");
    let status = lookup(&adapter, Some(&token), Duration::from_secs(1)).await.unwrap();
    assert!(matches!(status, SessionStatus::Resolved(Some(ref s)) if s.user.email == "ana@example.com"));
}

#[tokio::test]
async fn lookup_slower_than_timeout_is_pending() {
    let adapter = MemoryAuthAdapter::new().with_lookup_delay(Duration::from_millis(200));
    let token = adapter.seed_session("Ana", "ana@example.com");
    let status = lookup(&adapter, Some(&token), Duration::from_millis(10)).await.unwrap();
    assert_eq!(status, SessionStatus::Pending);
}

#[tokio::test]
async fn lookup_failure_propagates() {
    let adapter = MemoryAuthAdapter::new().with_failing_lookups();
    let result = lookup(&adapter, Some("abc"), Duration::from_secs(1)).await;
    assert!(matches!(result, Err(AuthError::Db(_))));
}
