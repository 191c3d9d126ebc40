//! Domain services used by page and API routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential rules and persistence concerns so route
//! handlers can stay focused on form handling, cookies and redirects.

pub mod account;
pub mod auth;
pub mod password;
pub mod session;
