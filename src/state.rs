//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the auth adapter (which owns the database pool in production)
//! and the parsed runtime configuration.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::AuthAdapter;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthAdapter>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthAdapter>, config: AppConfig) -> Self {
        Self { auth, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
