//! Type-safe identifier wrappers.
//!
//! | Type | Format | Scope |
//! |------|--------|-------|
//! | [`TabId`] | `tab-` + 7 chars of `[0-9a-z]` | One browser tab |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Prefix of every generated tab identifier.
pub const TAB_ID_PREFIX: &str = "tab-";

/// Number of random characters after the prefix.
pub const TAB_ID_RANDOM_LEN: usize = 7;

/// Alphabet for the random part (base 36, lowercase).
const TAB_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static TAB_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^tab-[0-9a-z]{7}$").expect("tab id pattern is a valid regex")
});

// ============================================================================
// TabId
// ============================================================================

/// Identifier distinguishing sessions opened in separate browser tabs.
///
/// Values read back from storage are accepted verbatim, so a `TabId` is not
/// guaranteed to match the generated format. Use [`TabId::is_well_formed`]
/// when that matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Generates a fresh identifier from the thread-local RNG.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a fresh identifier from the given RNG.
    #[must_use]
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut value = String::with_capacity(TAB_ID_PREFIX.len() + TAB_ID_RANDOM_LEN);
        value.push_str(TAB_ID_PREFIX);
        for _ in 0..TAB_ID_RANDOM_LEN {
            let index = rng.gen_range(0..TAB_ID_ALPHABET.len());
            value.push(char::from(TAB_ID_ALPHABET[index]));
        }
        Self(value)
    }

    /// Wraps a previously persisted identifier.
    #[inline]
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the value matches `tab-[0-9a-z]{7}`.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        TAB_ID_PATTERN.is_match(&self.0)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TabId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TabId> for String {
    fn from(id: TabId) -> Self {
        id.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_generated_ids_are_well_formed() {
        for _ in 0..500 {
            let id = TabId::generate();
            assert!(id.is_well_formed(), "bad tab id: {id}");
            assert_eq!(id.as_str().len(), 11);
        }
    }

    #[test]
    fn test_generate_with_seed_is_deterministic() {
        let a = TabId::generate_with(&mut StdRng::seed_from_u64(7));
        let b = TabId::generate_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_ids_rarely_collide() {
        let ids: FxHashSet<TabId> = (0..1_000).map(|_| TabId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_from_stored_keeps_value_verbatim() {
        let id = TabId::from_stored("legacy-value");
        assert_eq!(id.as_str(), "legacy-value");
        assert!(!id.is_well_formed());
    }

    #[test]
    fn test_uppercase_is_not_well_formed() {
        assert!(!TabId::from_stored("tab-ABCDEFG").is_well_formed());
        assert!(TabId::from_stored("tab-abc1234").is_well_formed());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = TabId::from_stored("tab-abc1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tab-abc1234\"");
    }
}
