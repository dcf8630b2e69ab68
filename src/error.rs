//! Error types for the OIDC tab client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use oidc_tab_client::{Error, Result};
//!
//! async fn example(client: &SecureClient) -> Result<()> {
//!     match client.login("alice", "s3cret").await {
//!         Err(Error::Http { status: 401, message }) => eprintln!("{message}"),
//!         other => { other?; }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Backend | [`Error::Http`] |
//! | Transport | [`Error::Transport`], [`Error::Reqwest`] |
//! | Storage | [`Error::Storage`], [`Error::Io`] |
//! | Decoding | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument passed by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Non-success HTTP status, normalized.
    ///
    /// The display output is exactly `message`, so it can be surfaced to a
    /// user without further formatting.
    #[error("{message}")]
    Http {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message taken from the response body or synthesized from the status.
        message: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// Transport failure reported by a [`Transport`](crate::transport::Transport)
    /// implementation.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// Tab-scoped storage failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// HTTP client error.
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON decoding error.
    ///
    /// A success response whose body is not the expected JSON ends up here.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a normalized HTTP error.
    #[inline]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a storage error.
    #[inline]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the backend answered with a non-success status.
    #[inline]
    #[must_use]
    pub fn is_http_error(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Returns `true` if the request never produced a response.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Reqwest(_))
    }

    /// Returns the HTTP status for normalized backend errors.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_http_error_displays_message_only() {
        let err = Error::http(401, "invalid credentials");
        assert_eq!(err.to_string(), "invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("missing base url");
        assert_eq!(err.to_string(), "Configuration error: missing base url");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_is_http_error() {
        assert!(Error::http(500, "HTTP 500").is_http_error());
        assert!(!Error::transport("refused").is_http_error());
    }

    #[test]
    fn test_is_transport_error() {
        assert!(Error::transport("connection refused").is_transport_error());
        assert!(!Error::storage("quota").is_transport_error());
        assert!(!Error::http(502, "HTTP 502").is_transport_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
