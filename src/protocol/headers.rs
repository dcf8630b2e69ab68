//! Wire names and the header mapping type.

// ============================================================================
// Constants
// ============================================================================

/// Cookie the backend uses to publish the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Header echoing the CSRF cookie (double-submit).
pub const CSRF_HEADER_NAME: &str = "X-XSRF-TOKEN";

/// Header carrying the per-tab identifier.
pub const TAB_ID_HEADER_NAME: &str = "X-Tab-Id";

/// Key of the tab identifier in tab-scoped storage.
pub const TAB_ID_STORAGE_KEY: &str = "tabId";

/// Query parameter carrying the tab identifier on navigable URLs.
pub const TAB_ID_QUERY_PARAM: &str = "tabId";

/// Query parameter naming the OIDC provider.
pub const PROVIDER_QUERY_PARAM: &str = "provider";

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Form content type used by the credential login endpoint.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

// ============================================================================
// Headers
// ============================================================================

/// Ordered header mapping with case-insensitive names.
///
/// Inserting a name that already exists (in any letter case) replaces the
/// value in place and keeps the originally inserted spelling of the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty mapping.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a header, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value for `name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    /// Returns `true` if `name` is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|index| self.entries.remove(index).1)
    }

    /// Overlays every entry of `other` onto `self`.
    pub fn overlay(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Number of headers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
