//! HTTP transport layer.
//!
//! The client decorates requests; a [`Transport`] puts them on the wire.
//! Exactly one [`Transport::send`] call is made per client operation, with
//! no retries.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   OutboundRequest   ┌─────────────────┐
//! │  SecureClient    │────────────────────►│  Transport      │──► backend
//! │  (headers, CSRF) │◄────────────────────│  (reqwest, ...) │
//! └──────────────────┘  TransportResponse  └─────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `http` | [`HttpTransport`] backed by `reqwest` |

// ============================================================================
// Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::protocol::{OutboundRequest, TransportResponse};

// ============================================================================
// Submodules
// ============================================================================

/// `reqwest` based transport.
pub mod http;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpTransport;

// ============================================================================
// Transport
// ============================================================================

/// Request/response primitive used by [`SecureClient`](crate::SecureClient).
///
/// Implementations send the request exactly as given: headers and body must
/// not be altered. Network failures are reported as errors; any HTTP status,
/// including 4xx and 5xx, is a successful send.
pub trait Transport: Send + Sync + 'static {
    /// Sends one request and returns the raw response.
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        (**self).send(request)
    }
}
