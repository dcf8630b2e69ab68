//! Readable cookie access.
//!
//! The client only ever reads cookies, through [`CookieReader`]. Two readers
//! are provided:
//!
//! | Type | Models |
//! |------|--------|
//! | [`DocumentCookies`] | A raw `document.cookie` string handed over by a host |
//! | [`CookieJar`] | reqwest's domain-scoped jar, shared with the HTTP transport |

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use tracing::{debug, trace};
use url::Url;

// ============================================================================
// CookieReader
// ============================================================================

/// Capability for reading a cookie value by name.
pub trait CookieReader: Send + Sync {
    /// Returns the current value of cookie `name` as seen by a request to
    /// `url`, if any.
    fn read_cookie(&self, url: &Url, name: &str) -> Option<String>;
}

impl<T: CookieReader + ?Sized> CookieReader for Arc<T> {
    fn read_cookie(&self, url: &Url, name: &str) -> Option<String> {
        (**self).read_cookie(url, name)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Looks up `name` in a `document.cookie` style string (`a=1; b=2`).
///
/// A name that occurs more than once is ambiguous and yields `None`.
#[must_use]
pub fn find_cookie(cookie_string: &str, name: &str) -> Option<String> {
    let mut matches = cookie_string
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(key, _)| *key == name)
        .map(|(_, value)| value);

    let value = matches.next()?;
    if matches.next().is_some() {
        debug!(name = %name, "Cookie name is ambiguous, ignoring");
        return None;
    }
    Some(value.to_string())
}

// ============================================================================
// DocumentCookies
// ============================================================================

/// Reader over a raw `document.cookie` string.
///
/// The string is already scoped to the page by the browser, so the request
/// URL is not consulted. Hosts push the latest string with
/// [`DocumentCookies::replace`]; every read parses it afresh.
#[derive(Debug, Default)]
pub struct DocumentCookies {
    raw: RwLock<String>,
}

impl DocumentCookies {
    /// Creates a reader from a cookie string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: RwLock::new(raw.into()),
        }
    }

    /// Replaces the cookie string.
    pub fn replace(&self, raw: impl Into<String>) {
        *self.raw.write() = raw.into();
    }
}

impl CookieReader for DocumentCookies {
    fn read_cookie(&self, _url: &Url, name: &str) -> Option<String> {
        find_cookie(&self.raw.read(), name)
    }
}

// ============================================================================
// CookieJar
// ============================================================================

/// Thread-safe cookie jar backed by [`reqwest::cookie::Jar`].
///
/// Cookies are scoped by domain, path and expiry. Plugged into
/// [`HttpTransport`](crate::transport::HttpTransport) it receives `Set-Cookie`
/// headers and attaches cookies to requests, so the backend's rotating
/// `XSRF-TOKEN` is visible to the client on the next call.
///
/// Reads see every cookie the jar would send to the URL, HttpOnly included.
#[derive(Debug, Default)]
pub struct CookieJar {
    jar: Jar,
}

impl CookieJar {
    /// Creates an empty jar.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cookie as if `url` had answered with `Set-Cookie: <cookie>`.
    pub fn add_cookie_str(&self, cookie: &str, url: &Url) {
        trace!(url = %url, "Storing cookie");
        self.jar.add_cookie_str(cookie, url);
    }

    /// Builds the `Cookie` request header value for `url`.
    #[must_use]
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }
}

impl CookieReader for CookieJar {
    fn read_cookie(&self, url: &Url, name: &str) -> Option<String> {
        find_cookie(&self.cookie_header(url)?, name)
    }
}

impl CookieStore for CookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar.set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

// ============================================================================
// Tests
// ============================================================================
