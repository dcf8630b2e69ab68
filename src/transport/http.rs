//! `reqwest` backed transport.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method};
use tracing::{debug, trace};

use crate::browser::CookieJar;
use crate::error::Result;
use crate::protocol::{HttpMethod, OutboundRequest, TransportResponse};

use super::Transport;

// ============================================================================
// HttpTransport
// ============================================================================

/// Transport over a shared [`reqwest::Client`].
///
/// Redirects are not followed: a 3xx reaches the client as a failed response,
/// so request headers never travel to a `Location` on another origin.
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport without cookie handling.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reqwest`](crate::Error::Reqwest) if the client cannot
    /// be initialized.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: base_client().build()?,
        })
    }

    /// Creates a transport that stores and sends cookies through `jar`.
    ///
    /// Pass the same jar to the client as its [`CookieReader`](crate::browser::CookieReader)
    /// so a rotated `XSRF-TOKEN` is echoed on the next request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reqwest`](crate::Error::Reqwest) if the client cannot
    /// be initialized.
    pub fn with_cookie_jar(jar: Arc<CookieJar>) -> Result<Self> {
        Ok(Self {
            client: base_client().cookie_provider(jar).build()?,
        })
    }

    /// Wraps an already configured client.
    ///
    /// The client's own redirect policy applies; build it with
    /// [`Policy::none`] to keep the single-origin guarantee.
    #[inline]
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn base_client() -> ClientBuilder {
    Client::builder().redirect(Policy::none())
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse> {
        let OutboundRequest {
            url,
            method,
            headers,
            body,
            ..
        } = request;

        trace!(method = %method, url = %url, headers = headers.len(), "Sending request");

        let mut builder = self.client.request(to_reqwest_method(method), url.clone());
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body.to_bytes());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(method = %method, url = %url, status, body_len = body.len(), "Received response");
        Ok(TransportResponse { status, body })
    }
}

// ============================================================================
// Tests
// ============================================================================
