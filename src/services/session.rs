//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! Sign-in hands the browser a random 32-byte token in an `HttpOnly` cookie.
//! Only the SHA-256 digest of that token reaches the `sessions` table, so a
//! database read does not yield usable credentials.
//!
//! Expired rows are ignored on lookup rather than swept eagerly.

use std::fmt::Write;

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Digest stored in place of the raw token.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// User fields exposed to pages and the session API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
}

impl SessionUser {
    /// Name to greet the user with; empty names fall back to `"User"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() { "User" } else { trimmed }
    }
}

/// Session metadata returned alongside the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub user_id: Uuid,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub session: SessionInfo,
    pub user: SessionUser,
}

/// Freshly issued session: the raw token is only ever held in memory and the cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub info: SessionInfo,
}

/// Create a session for the given user.
pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    ttl: time::Duration,
    user_agent: Option<&str>,
) -> Result<IssuedSession, sqlx::Error> {
    let token = generate_token();
    let row = sqlx::query(
        r"INSERT INTO sessions (token_hash, user_id, user_agent, expires_at)
          VALUES ($1, $2, $3, now() + make_interval(secs => $4))
          RETURNING EXTRACT(EPOCH FROM expires_at)::BIGINT AS expires_at",
    )
    .bind(hash_token(&token))
    .bind(user_id)
    .bind(user_agent)
    .bind(ttl.as_seconds_f64())
    .fetch_one(pool)
    .await?;
    Ok(IssuedSession { token, info: SessionInfo { user_id, expires_at: row.get("expires_at") } })
}

/// Validate a session token and return the session with its user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<Session>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT
              u.id,
              u.name,
              u.email,
              u.email_verified,
              EXTRACT(EPOCH FROM s.expires_at)::BIGINT AS expires_at
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token_hash = $1 AND s.expires_at > now()",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        let user = SessionUser {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            email_verified: r.get("email_verified"),
        };
        Session { session: SessionInfo { user_id: user.id, expires_at: r.get("expires_at") }, user }
    }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(token))
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
