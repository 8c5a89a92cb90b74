//! Short link entity.

use serde::{Deserialize, Serialize};

/// A mapping from a short key to its destination URL.
///
/// Persisted as a single key→value entry with no expiry. Uniqueness of `key`
/// is best-effort: the store has no atomic compare-and-swap, so a narrow race
/// window exists between the existence check and the write. Links are created
/// once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    /// Short key: 6 lowercase hex chars when allocated, or a custom
    /// `[0-9a-z-]+` value chosen by the caller.
    pub key: String,
    /// Destination URL in normalized form.
    pub target: String,
}

impl ShortLink {
    pub fn new(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: target.into(),
        }
    }

    /// Builds the public short URL for this link.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_joins_base_and_key() {
        let link = ShortLink::new("abc123", "https://example.com");
        assert_eq!(
            link.short_url("https://s.example.com"),
            "https://s.example.com/abc123"
        );
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let link = ShortLink::new("abc123", "https://example.com");
        assert_eq!(
            link.short_url("https://s.example.com/"),
            "https://s.example.com/abc123"
        );
    }
}
