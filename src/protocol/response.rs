//! Response types and error-body normalization.
//!
//! # Payloads
//!
//! | Endpoint | Type |
//! |----------|------|
//! | `api/providers` | `Vec<`[`Provider`]`>` |
//! | `api/session` | [`SessionInfo`] |
//! | `api/login` | [`LoginResponse`] |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ============================================================================
// TransportResponse
// ============================================================================

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response from a status and body.
    #[inline]
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-success response into the normalized error.
    #[must_use]
    pub fn into_error(self) -> Error {
        let message = error_message(self.status, &self.body);
        Error::http(self.status, message)
    }
}

// ============================================================================
// Error Normalization
// ============================================================================

/// Extracts a user-facing message from a failure body.
///
/// - body is not JSON: `HTTP <status>`
/// - JSON with a non-empty string `message`: that message
/// - any other JSON: `Request failed with status <status>`
#[must_use]
pub fn error_message(status: u16, body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<Value>(body) else {
        return format!("HTTP {status}");
    };

    parsed
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("Request failed with status {status}"),
            str::to_string,
        )
}

// ============================================================================
// Provider
// ============================================================================

/// A configured OIDC provider, as listed by `api/providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Provider key, used in [`oidc_login_url`](crate::SecureClient::oidc_login_url).
    pub name: String,

    /// Human readable name.
    #[serde(default)]
    pub display_name: String,

    /// Logo URL; empty when the provider has none.
    #[serde(default)]
    pub image_url: String,
}

// ============================================================================
// SessionInfo
// ============================================================================

/// Session state reported by `api/session`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    /// Backend success flag.
    #[serde(default)]
    pub success: bool,

    /// Whether the session is authenticated.
    #[serde(default)]
    pub authenticated: bool,

    /// Principal name, if any.
    #[serde(default)]
    pub user: Option<String>,

    /// Server session id.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Tab id the backend bound to this session.
    #[serde(default)]
    pub tab_id: Option<String>,

    /// Browser-level session cookie value.
    #[serde(default)]
    pub browser_id: Option<String>,

    /// Provider-specific user profile, passed through untyped.
    #[serde(default)]
    pub user_info: Option<Value>,
}

impl SessionInfo {
    /// Returns `true` if the backend bound this session to `tab_id`.
    #[must_use]
    pub fn is_bound_to(&self, tab_id: &str) -> bool {
        self.tab_id.as_deref() == Some(tab_id)
    }
}

// ============================================================================
// LoginResponse
// ============================================================================

/// Body returned by a successful `api/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Backend success flag.
    #[serde(default)]
    pub success: bool,

    /// Server session id of the new session.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Optional message.
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
