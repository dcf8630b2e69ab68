//! Wire-level types shared by the client and its transports.
//!
//! # Wire Contract
//!
//! | Item | Name | Direction |
//! |------|------|-----------|
//! | Tab header | `X-Tab-Id` | Client → Backend, every request |
//! | CSRF header | `X-XSRF-TOKEN` | Client → Backend, when the cookie exists |
//! | CSRF cookie | `XSRF-TOKEN` | Backend → Cookie jar |
//! | Storage key | `tabId` | Tab-scoped storage |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `headers` | Wire names and [`Headers`] |
//! | `request` | [`RequestOptions`] and [`OutboundRequest`] |
//! | `response` | [`TransportResponse`], payloads, error normalization |

// ============================================================================
// Submodules
// ============================================================================

/// Wire names and header mapping.
pub mod headers;

/// Outbound request types.
pub mod request;

/// Response types and error normalization.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use headers::{
    CONTENT_TYPE, CONTENT_TYPE_FORM, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, Headers,
    PROVIDER_QUERY_PARAM, TAB_ID_HEADER_NAME, TAB_ID_QUERY_PARAM, TAB_ID_STORAGE_KEY,
};
pub use request::{HttpMethod, OutboundRequest, RequestBody, RequestOptions};
pub use response::{LoginResponse, Provider, SessionInfo, TransportResponse, error_message};
