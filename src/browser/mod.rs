//! Browser-side capabilities.
//!
//! The client never touches global browser state. Everything it needs from
//! the browser is injected through these types:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabScopedStore`] | `sessionStorage`-like key/value storage |
//! | [`CookieReader`] | Read access to cookies |
//! | [`TabIdentity`] | The per-tab identifier, resolved from storage |
//!
//! # Example
//!
//! ```
//! use oidc_tab_client::browser::{MemoryTabStore, TabIdentity};
//!
//! let tab = MemoryTabStore::new();
//! let identity = TabIdentity::new(&tab);
//!
//! // A "reload" of the same tab sees the same identifier.
//! let reloaded = TabIdentity::new(&tab);
//! assert_eq!(identity.tab_id(), reloaded.tab_id());
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Cookie readers and the cookie jar.
pub mod cookie;

/// Tab identity lifecycle.
pub mod identity;

/// Tab-scoped storage.
pub mod storage;

// ============================================================================
// Re-exports
// ============================================================================

pub use cookie::{CookieJar, CookieReader, DocumentCookies, find_cookie};
pub use identity::TabIdentity;
pub use storage::{FileTabStore, MemoryTabStore, TabScopedStore};
