//! User and credential records.
//!
//! A user row carries identity (`email`, `name`); the matching `accounts` row
//! with `provider_id = 'credential'` carries the password hash. Both are
//! written in one transaction on sign-up.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::auth::AuthError;
use super::password::{MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, password_len};
use super::session::SessionUser;

const CREDENTIAL_PROVIDER: &str = "credential";

/// Sign-up input after server-side credential rules have passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
}

/// Stored credential for an email address.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: SessionUser,
    pub password_hash: String,
}

/// Trim and lowercase an address, rejecting anything without a local part and
/// a dotted domain whose labels are all non-empty.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return None;
    }
    Some(normalized)
}

/// Apply the credential rules enforced on every sign-up, whatever the caller validated.
///
/// # Errors
///
/// Returns the first failing rule: missing field, invalid email, or password length.
pub fn validate_new_account(name: &str, email: &str, password: &str) -> Result<NewAccount, AuthError> {
    let name = name.trim();
    if name.is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    let len = password_len(password);
    if len < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AuthError::PasswordTooLong);
    }
    Ok(NewAccount { name: name.to_owned(), email })
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> SessionUser {
    SessionUser {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        email_verified: row.get("email_verified"),
    }
}

/// Insert a user and its password credential. Duplicate emails map to
/// [`AuthError::UserAlreadyExists`].
pub async fn insert_user_with_credential(
    pool: &PgPool,
    account: &NewAccount,
    password_hash: &str,
) -> Result<SessionUser, AuthError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r"INSERT INTO users (email, name)
          VALUES ($1, $2)
          RETURNING id, name, email, email_verified",
    )
    .bind(&account.email)
    .bind(&account.name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::UserAlreadyExists,
        other => AuthError::Db(other),
    })?;
    let user = user_from_row(&row);

    sqlx::query("INSERT INTO accounts (user_id, provider_id, password_hash) VALUES ($1, $2, $3)")
        .bind(user.id)
        .bind(CREDENTIAL_PROVIDER)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user)
}

/// Look up the password credential for a normalized email.
pub async fn find_credential(pool: &PgPool, email: &str) -> Result<Option<Credential>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.name, u.email, u.email_verified, a.password_hash
          FROM users u
          JOIN accounts a ON a.user_id = u.id AND a.provider_id = $2
          WHERE u.email = $1",
    )
    .bind(email)
    .bind(CREDENTIAL_PROVIDER)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| Credential { user: user_from_row(&r), password_hash: r.get("password_hash") }))
}

/// Insert a bare user (no credential) unless the email is taken. Returns the user's id.
pub async fn ensure_user(pool: &PgPool, email: &str, name: &str) -> Result<Uuid, sqlx::Error> {
    let row = sqlx::query(
        r"INSERT INTO users (email, name)
          VALUES ($1, $2)
          ON CONFLICT (email) DO UPDATE SET name = users.name
          RETURNING id",
    )
    .bind(email)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}

/// All users, oldest first.
pub async fn list_users(pool: &PgPool) -> Result<Vec<SessionUser>, sqlx::Error> {
    let rows = sqlx::query("SELECT id, name, email, email_verified FROM users ORDER BY created_at, email")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(user_from_row).collect())
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
