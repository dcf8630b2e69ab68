//! Secure request client.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SecureClient`] | Decorates, sends and normalizes requests |
//! | [`ClientBuilder`] | Fluent configuration builder |
//!
//! # Operations
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`SecureClient::fetch_providers`] | `GET api/providers` |
//! | [`SecureClient::fetch_session`] | `GET api/session` |
//! | [`SecureClient::login`] | `POST api/login` (form) |
//! | [`SecureClient::logout_url`] | none, builds `portal/logout?tabId=…` |
//! | [`SecureClient::oidc_login_url`] | none, builds `portal/oidc/login?provider=…&tabId=…` |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Core client and request primitive.
pub mod core;

/// Named endpoints and URL helpers.
pub mod endpoints;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientBuilder;
pub use self::core::SecureClient;
pub use endpoints::{LOGIN_PATH, LOGOUT_PATH, OIDC_LOGIN_PATH, PROVIDERS_PATH, SESSION_PATH};
