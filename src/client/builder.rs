//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and creating [`SecureClient`]
//! instances.
//!
//! # Example
//!
//! ```no_run
//! use oidc_tab_client::SecureClient;
//!
//! # fn example() -> oidc_tab_client::Result<()> {
//! let client = SecureClient::builder()
//!     .base_url("https://portal.example.com/app/")
//!     .build()?;
//! println!("tab id: {}", client.tab_id());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::browser::{CookieJar, CookieReader, MemoryTabStore, TabScopedStore};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Transport};

use super::core::SecureClient;

// ============================================================================
// ClientBuilder
// ============================================================================

/// Builder for configuring a [`SecureClient`] instance.
///
/// Use [`SecureClient::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct ClientBuilder {
    /// API base URL that endpoint paths are resolved against.
    base_url: Option<String>,
    /// Tab-scoped storage holding the tab id.
    tab_store: Option<Arc<dyn TabScopedStore>>,
    /// Cookie reader used for the CSRF token.
    cookies: Option<Arc<dyn CookieReader>>,
    /// Jar shared with the default HTTP transport.
    cookie_jar: Option<Arc<CookieJar>>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("tab_store", &self.tab_store.is_some())
            .field("cookies", &self.cookies.is_some())
            .field("cookie_jar", &self.cookie_jar.is_some())
            .finish()
    }
}

// ============================================================================
// ClientBuilder Implementation
// ============================================================================

impl ClientBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (e.g. `https://portal.example.com/app/`).
    ///
    /// A missing trailing slash is added, so `https://host/app` and
    /// `https://host/app/` behave the same.
    #[inline]
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the tab-scoped storage.
    ///
    /// Defaults to a fresh [`MemoryTabStore`], i.e. a brand new tab.
    #[inline]
    #[must_use]
    pub fn tab_store(mut self, store: Arc<dyn TabScopedStore>) -> Self {
        self.tab_store = Some(store);
        self
    }

    /// Sets the cookie reader used to look up the CSRF token.
    ///
    /// Takes precedence over [`cookie_jar`](Self::cookie_jar) for reads.
    #[inline]
    #[must_use]
    pub fn cookies(mut self, reader: Arc<dyn CookieReader>) -> Self {
        self.cookies = Some(reader);
        self
    }

    /// Sets the cookie jar.
    ///
    /// With [`build`](Self::build) the jar is shared between the HTTP
    /// transport (which fills it from `Set-Cookie`) and the client (which
    /// reads the CSRF token from it).
    #[inline]
    #[must_use]
    pub fn cookie_jar(mut self, jar: Arc<CookieJar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Builds a client over a `reqwest` [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the base URL is missing or invalid
    /// - [`Error::Reqwest`] if the HTTP client cannot be initialized
    pub fn build(self) -> Result<SecureClient<HttpTransport>> {
        let base_url = self.validate_base_url()?;
        let jar = self.cookie_jar.clone().unwrap_or_default();
        let transport = HttpTransport::with_cookie_jar(Arc::clone(&jar))?;
        let cookies = self
            .cookies
            .clone()
            .unwrap_or_else(|| jar as Arc<dyn CookieReader>);

        Ok(self.assemble(base_url, cookies, transport))
    }

    /// Builds a client over a caller-provided transport.
    ///
    /// Without [`cookies`](Self::cookies) or [`cookie_jar`](Self::cookie_jar)
    /// the client reads from an empty jar and never sends a CSRF header.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the base URL is missing or invalid
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<SecureClient<T>> {
        let base_url = self.validate_base_url()?;
        let cookies = match (self.cookies.clone(), self.cookie_jar.clone()) {
            (Some(reader), _) => reader,
            (None, Some(jar)) => jar as Arc<dyn CookieReader>,
            (None, None) => {
                debug!("No cookie source configured, CSRF header disabled");
                Arc::new(CookieJar::new()) as Arc<dyn CookieReader>
            }
        };

        Ok(self.assemble(base_url, cookies, transport))
    }

    fn assemble<T: Transport>(
        self,
        base_url: Url,
        cookies: Arc<dyn CookieReader>,
        transport: T,
    ) -> SecureClient<T> {
        let tab_store = self
            .tab_store
            .unwrap_or_else(|| Arc::new(MemoryTabStore::new()) as Arc<dyn TabScopedStore>);

        SecureClient::from_parts(base_url, tab_store, cookies, transport)
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientBuilder {
    /// Validates and normalizes the base URL.
    fn validate_base_url(&self) -> Result<Url> {
        let raw = self.base_url.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::config(
                "API base URL is required. Use .base_url() to set it.\n\
                 Example: SecureClient::builder().base_url(\"https://portal.example.com/app/\")",
            ));
        }

        let mut url = Url::parse(raw)
            .map_err(|e| Error::config(format!("Invalid API base URL '{raw}': {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::transport::mock::RecordingTransport;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ClientBuilder::new();
        assert!(builder.base_url.is_none());
        assert!(builder.tab_store.is_none());
        assert!(builder.cookies.is_none());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = ClientBuilder::new()
            .base_url("https://portal.example.com/app")
            .validate_base_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://portal.example.com/app/");
    }

    #[test]
    fn test_base_url_drops_query_and_fragment() {
        let url = ClientBuilder::new()
            .base_url("http://localhost:8080/?x=1#top")
            .validate_base_url()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_build_fails_without_base_url() {
        let err = ClientBuilder::new()
            .build_with_transport(RecordingTransport::new())
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_build_fails_with_relative_base_url() {
        let err = ClientBuilder::new()
            .base_url("portal/")
            .build_with_transport(RecordingTransport::new())
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_fails_with_unsupported_scheme() {
        let err = ClientBuilder::new()
            .base_url("ftp://example.com/")
            .build_with_transport(RecordingTransport::new())
            .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_build_with_default_transport() {
        let client = ClientBuilder::new()
            .base_url("http://localhost/")
            .build()
            .unwrap();
        assert!(client.tab_id().is_well_formed());
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = ClientBuilder::new().base_url("http://localhost/");
        let cloned = builder.clone();
        assert_eq!(builder.base_url, cloned.base_url);
    }
}
