//! Outbound request types.
//!
//! [`RequestOptions`] is what callers hand to the client; [`OutboundRequest`]
//! is what the client hands to a [`Transport`](crate::transport::Transport)
//! after the security headers have been merged in.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use url::Url;
use url::form_urlencoded;

use super::headers::Headers;

// ============================================================================
// HttpMethod
// ============================================================================

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method token as sent on the wire.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RequestBody
// ============================================================================

/// Request body, passed to the transport unmodified.
///
/// The only encoding this crate performs is for [`RequestBody::Form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// UTF-8 text sent as-is.
    Text(String),

    /// Raw bytes sent as-is.
    Bytes(Vec<u8>),

    /// Form fields, encoded as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Creates a form body from name/value pairs.
    #[must_use]
    pub fn form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Returns the bytes to put on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.clone().into_bytes(),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Form(fields) => form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields.iter())
                .finish()
                .into_bytes(),
        }
    }

    /// Length in bytes, without logging the content.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Bytes(bytes) => bytes.len(),
            Self::Form(_) => self.to_bytes().len(),
        }
    }

    /// Returns `true` if the encoded body is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// RequestOptions
// ============================================================================

/// Caller-side request configuration.
///
/// # Example
///
/// ```ignore
/// let options = RequestOptions::post()
///     .header("Accept", "application/json")
///     .body(RequestBody::Text("{}".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: HttpMethod,

    /// Caller headers, merged under the security headers.
    pub headers: Headers,

    /// Optional body.
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    /// GET with no headers and no body.
    #[inline]
    #[must_use]
    pub fn get() -> Self {
        Self::default()
    }

    /// POST with no headers and no body.
    #[inline]
    #[must_use]
    pub fn post() -> Self {
        Self::method(HttpMethod::Post)
    }

    /// Options for an arbitrary method.
    #[inline]
    #[must_use]
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Adds a caller header.
    #[inline]
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces all caller headers.
    #[inline]
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the body.
    #[inline]
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

// ============================================================================
// OutboundRequest
// ============================================================================

/// A fully decorated request ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Absolute URL (API base joined with `path`).
    pub url: Url,

    /// Endpoint path relative to the API base, as the caller gave it.
    pub path: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Merged headers, security headers included.
    pub headers: Headers,

    /// Optional body.
    pub body: Option<RequestBody>,
}

// ============================================================================
// Tests
// ============================================================================
