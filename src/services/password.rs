//! Password hashing for email/password credentials.
//!
//! Hashes are argon2id PHC strings stored in `accounts.password_hash`.
//! Hashing is CPU-bound, so async callers go through [`hash_blocking`] and
//! [`verify_blocking`], which move the work onto tokio's blocking pool.

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Verified against when an email has no credential, so both sign-in
/// failure paths cost one argon2 verify.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| hash("unrlsd-absent-credential").ok());

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("password worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password length as browsers report it (UTF-16 code units), which the
/// length bounds are expressed in.
#[must_use]
pub fn password_len(password: &str) -> usize {
    password.encode_utf16().count()
}

fn salt() -> Result<SaltString, PasswordError> {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Hash a password into an argon2 PHC string.
///
/// # Errors
///
/// Returns an error if salt encoding or hashing fails.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = salt()?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a password against a stored PHC string. Malformed hashes never verify.
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .ok()
        .is_some_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
}

fn dummy_hash() -> &'static str {
    DUMMY_HASH.as_deref().unwrap_or_default()
}

pub async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash(&password)).await?
}

pub async fn verify_blocking(password: String, stored: String) -> Result<bool, PasswordError> {
    Ok(tokio::task::spawn_blocking(move || verify(&password, &stored)).await?)
}

/// Spend a full verify on the dummy hash. Always reports no match.
pub async fn verify_dummy_blocking(password: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || {
        let _ = verify(&password, dummy_hash());
    })
    .await?;
    Ok(false)
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
