//! Runtime configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (when present) and builds one `AppConfig` before the
//! pool is created. Handlers read cookie and session settings from the copy
//! held in `AppState`.

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 7;
/// Upper bound for `SESSION_TTL_HOURS` (ten years).
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;
const DEFAULT_SESSION_LOOKUP_TIMEOUT_MS: u64 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    pub session_ttl: time::Duration,
    /// How long a gated page waits on the session store before rendering the loading view.
    pub session_lookup_timeout: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `COOKIE_SECURE`: inferred from the `PUBLIC_URL` scheme when unset
    /// - `SESSION_TTL_HOURS`: default 168
    /// - `SESSION_LOOKUP_TIMEOUT_MS`: default 2000
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, a value does not parse,
    /// or `SESSION_TTL_HOURS` is outside `1..=87600`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let public_url = std::env::var("PUBLIC_URL").ok();
        let cookie_secure = cookie_secure_from(std::env::var("COOKIE_SECURE").ok(), public_url.as_deref())?;

        Ok(Self {
            database_url,
            port: env_parse("PORT", DEFAULT_PORT)?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            cookie_secure,
            session_ttl: session_ttl_from(std::env::var("SESSION_TTL_HOURS").ok())?,
            session_lookup_timeout: Duration::from_millis(env_parse(
                "SESSION_LOOKUP_TIMEOUT_MS",
                DEFAULT_SESSION_LOOKUP_TIMEOUT_MS,
            )?),
        })
    }

    /// Config suitable for tests and tools that never open a listener.
    #[must_use]
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            port: DEFAULT_PORT,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            cookie_secure: false,
            session_ttl: time::Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            session_lookup_timeout: Duration::from_millis(DEFAULT_SESSION_LOOKUP_TIMEOUT_MS),
        }
    }
}

/// `COOKIE_SECURE` when set (and it must parse), else inferred from `PUBLIC_URL`.
fn cookie_secure_from(raw: Option<String>, public_url: Option<&str>) -> Result<bool, ConfigError> {
    match raw {
        Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value }),
        None => Ok(infer_secure(public_url)),
    }
}

fn session_ttl_from(raw: Option<String>) -> Result<time::Duration, ConfigError> {
    let Some(value) = raw else {
        return Ok(time::Duration::hours(DEFAULT_SESSION_TTL_HOURS));
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => Ok(time::Duration::hours(hours)),
        _ => Err(ConfigError::Invalid { key: "SESSION_TTL_HOURS", value }),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn infer_secure(public_url: Option<&str>) -> bool {
    public_url.is_some_and(|url| url.starts_with("https://"))
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
