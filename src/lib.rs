//! OIDC Tab Client - tab-isolated, CSRF-protected requests to an OIDC portal.
//!
//! Every request to the portal backend goes through one chokepoint,
//! [`SecureClient`], which enforces two properties:
//!
//! - **Tab isolation**: each request carries `X-Tab-Id`, an identifier kept
//!   in tab-scoped storage. Reloads of a tab keep it; other tabs get their own.
//! - **CSRF double-submit**: when the backend has set the `XSRF-TOKEN`
//!   cookie, its current value is echoed in `X-XSRF-TOKEN`.
//!
//! # Architecture
//!
//! Browser state is injected, never global:
//!
//! - [`TabScopedStore`] stands in for `sessionStorage`
//! - [`CookieReader`] stands in for `document.cookie`
//! - [`Transport`] puts requests on the wire (default: `reqwest`)
//!
//! # Quick Start
//!
//! ```no_run
//! use oidc_tab_client::{Result, SecureClient};
//!
//! async fn run() -> Result<()> {
//!     let client = SecureClient::builder()
//!         .base_url("https://portal.example.com/app/")
//!         .build()?;
//!
//!     for provider in client.fetch_providers().await? {
//!         println!("{} -> {}", provider.display_name, client.oidc_login_url(&provider.name));
//!     }
//!
//!     let session = client.fetch_session().await?;
//!     if !session.authenticated {
//!         client.login("alice", "s3cret").await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Storage, cookies, [`TabIdentity`] |
//! | [`client`] | [`SecureClient`] and [`ClientBuilder`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | [`TabId`] |
//! | [`protocol`] | Wire names, request and response types |
//! | [`transport`] | [`Transport`] trait and [`HttpTransport`] |

// ============================================================================
// Modules
// ============================================================================

/// Browser-side capabilities: tab storage, cookies, tab identity.
pub mod browser;

/// Secure request client.
///
/// Use [`SecureClient::builder()`] to create a configured client.
pub mod client;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Wire-level types.
pub mod protocol;

/// HTTP transport layer.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{
    CookieJar, CookieReader, DocumentCookies, FileTabStore, MemoryTabStore, TabIdentity,
    TabScopedStore,
};

// Client types
pub use client::{ClientBuilder, SecureClient};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::TabId;

// Protocol types
pub use protocol::{
    Headers, HttpMethod, LoginResponse, Provider, RequestBody, RequestOptions, SessionInfo,
};

// Transport types
pub use transport::{HttpTransport, Transport};
