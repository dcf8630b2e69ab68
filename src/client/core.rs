//! Core client and the request primitive.
//!
//! Every request goes through [`SecureClient::send`]:
//!
//! 1. Resolve the path against the API base (same origin only).
//! 2. Merge headers: `X-Tab-Id`, caller headers, then the module's
//!    `X-Tab-Id` and `X-XSRF-TOKEN` on top.
//! 3. One transport call.
//! 4. Non-success: normalize into [`Error::Http`]. Success: decode JSON.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeOwned, Unexpected};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::browser::{CookieReader, TabIdentity, TabScopedStore};
use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::protocol::{
    CONTENT_TYPE, CONTENT_TYPE_FORM, CSRF_COOKIE_NAME, CSRF_HEADER_NAME, Headers, OutboundRequest,
    RequestBody, RequestOptions, TAB_ID_HEADER_NAME,
};
use crate::transport::{HttpTransport, Transport};

use super::builder::ClientBuilder;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a client.
pub(crate) struct ClientInner<T> {
    /// API base URL, always ending in `/`.
    pub base_url: Url,
    /// Tab identity, resolved at construction.
    pub identity: TabIdentity,
    /// Cookie source for the CSRF token.
    pub cookies: Arc<dyn CookieReader>,
    /// Transport.
    pub transport: T,
}

// ============================================================================
// SecureClient
// ============================================================================

/// Request client enforcing tab isolation and CSRF double-submit.
///
/// Cloning is cheap; clones share the same tab identity and transport.
pub struct SecureClient<T = HttpTransport> {
    pub(crate) inner: Arc<ClientInner<T>>,
}

impl<T> Clone for SecureClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SecureClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("tab_id", self.inner.identity.tab_id())
            .finish_non_exhaustive()
    }
}

impl SecureClient {
    /// Creates a new client builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> SecureClient<T> {
    /// Assembles a client. The tab id is resolved here, before any request.
    pub(crate) fn from_parts(
        base_url: Url,
        tab_store: Arc<dyn TabScopedStore>,
        cookies: Arc<dyn CookieReader>,
        transport: T,
    ) -> Self {
        let identity = TabIdentity::new(tab_store.as_ref());
        debug!(base_url = %base_url, tab_id = %identity.tab_id(), "Client ready");

        Self {
            inner: Arc::new(ClientInner {
                base_url,
                identity,
                cookies,
                transport,
            }),
        }
    }
}

// ============================================================================
// SecureClient - Accessors
// ============================================================================

impl<T: Transport> SecureClient<T> {
    /// Returns the identifier of the tab this client belongs to.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> &TabId {
        self.inner.identity.tab_id()
    }

    /// Returns the API base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the transport.
    #[inline]
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Reads the CSRF token from the cookie source.
    ///
    /// Read on every call, never cached: the backend may rotate it. An empty
    /// value counts as absent.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        self.inner
            .cookies
            .read_cookie(&self.inner.base_url, CSRF_COOKIE_NAME)
            .filter(|token| !token.is_empty())
    }

    /// Returns the security headers for requests made outside this client,
    /// such as a form submit or a navigation.
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.decorate(&Headers::new())
    }
}

// ============================================================================
// SecureClient - Requests
// ============================================================================

impl<T: Transport> SecureClient<T> {
    /// Sends a request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `path` is empty or leaves the API origin
    /// - [`Error::Transport`] / [`Error::Reqwest`] if nothing came back
    /// - [`Error::Http`] for non-success statuses
    /// - [`Error::Json`] if a success body is not valid JSON
    pub async fn send(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request_json(path, options).await
    }

    /// Sends a request and decodes the response into `R`.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send); a body that does not fit `R` is
    /// [`Error::Json`].
    pub async fn request_json<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let body = self.execute(path, options).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Like [`request_json`](Self::request_json), but the success body must
    /// be a JSON object. Arrays and scalars are [`Error::Json`].
    pub(crate) async fn request_object<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        let value: Value = self.request_json(path, options).await?;
        if !value.is_object() {
            return Err(Error::Json(serde::de::Error::invalid_type(
                unexpected(&value),
                &"a JSON object",
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(path, RequestOptions::get()).await
    }

    /// POST form `fields` to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn post_form<I, K, V>(&self, path: &str, fields: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.send(path, form_options(fields)).await
    }

    /// Issues exactly one transport call and returns the body of a success
    /// response.
    async fn execute(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        let RequestOptions {
            method,
            headers: caller_headers,
            body,
        } = options;
        let headers = self.decorate(&caller_headers);

        debug!(
            method = %method,
            path = %path,
            tab_id = %self.tab_id(),
            csrf = headers.contains(CSRF_HEADER_NAME),
            body_len = body.as_ref().map_or(0, RequestBody::len),
            "Sending request"
        );

        let request = OutboundRequest {
            url,
            path: path.to_string(),
            method,
            headers,
            body,
        };

        let response = self.inner.transport.send(request).await?;

        if !response.is_success() {
            let status = response.status;
            let err = response.into_error();
            debug!(method = %method, path = %path, status, error = %err, "Request failed");
            return Err(err);
        }

        trace!(method = %method, path = %path, status = response.status, "Request succeeded");
        Ok(response.body)
    }
}

// ============================================================================
// SecureClient - Internal
// ============================================================================

impl<T: Transport> SecureClient<T> {
    /// Merges caller headers with the security headers.
    ///
    /// `X-Tab-Id` and `X-XSRF-TOKEN` are owned by the client: caller values
    /// for those names are always replaced or dropped.
    pub(crate) fn decorate(&self, caller: &Headers) -> Headers {
        let tab_id = self.tab_id().as_str();

        let mut headers = Headers::new().with(TAB_ID_HEADER_NAME, tab_id);
        headers.overlay(caller);
        headers.insert(TAB_ID_HEADER_NAME, tab_id);

        match self.csrf_token() {
            Some(token) => {
                headers.insert(CSRF_HEADER_NAME, token);
            }
            None => {
                headers.remove(CSRF_HEADER_NAME);
            }
        }

        headers
    }

    /// Resolves `path` against the API base, refusing other origins.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_argument("request path must not be empty"));
        }

        if trimmed.starts_with("//") {
            return Err(Error::invalid_argument(format!(
                "request path '{path}' must not be protocol-relative"
            )));
        }

        let base = &self.inner.base_url;
        let url = base
            .join(trimmed.strip_prefix('/').unwrap_or(trimmed))
            .map_err(|e| Error::invalid_argument(format!("invalid request path '{path}': {e}")))?;

        if url.origin() != base.origin() {
            return Err(Error::invalid_argument(format!(
                "request path '{path}' resolves outside the API origin"
            )));
        }

        Ok(url)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Options for a form POST.
pub(crate) fn form_options<I, K, V>(fields: I) -> RequestOptions
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    RequestOptions::post()
        .header(CONTENT_TYPE, CONTENT_TYPE_FORM)
        .body(RequestBody::form(fields))
}

// ============================================================================
// Tests
// ============================================================================
