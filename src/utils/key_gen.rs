//! Short key generation and custom key validation.
//!
//! Generated keys are derived from cryptographically random bytes but are
//! deliberately short: 6 characters over a hex alphabet (~16 million
//! combinations) means collisions become likely at scale, and the allocator
//! must tolerate them.

use regex::Regex;
use std::sync::LazyLock;

/// Length of a generated short key in characters.
pub const KEY_LENGTH: usize = 6;

/// Pattern a custom key must match.
static CUSTOM_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-z-]+$").expect("valid regex literal"));

/// Keys reserved for system endpoints to prevent routing conflicts.
const RESERVED_KEYS: &[&str] = &["api", "health", "qr", "static", "robots.txt"];

/// Maximum accepted length for a custom key.
const MAX_CUSTOM_KEY_LENGTH: usize = 64;

/// Generates a random short key.
///
/// Takes 128 bits from the system RNG, renders them as lowercase hex, and
/// truncates to [`KEY_LENGTH`] characters. This is not unique by
/// construction; the allocator retries on collision.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_key() -> String {
    let mut buffer = [0u8; 16];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut key = hex::encode(buffer);
    key.truncate(KEY_LENGTH);
    key
}

/// Validates a user-provided custom key.
///
/// # Rules
///
/// - Non-empty, at most 64 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot be a reserved system key
///
/// # Errors
///
/// Returns a human-readable reason when a rule is violated.
pub fn validate_custom_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("custom key must not be empty".to_string());
    }

    if key.len() > MAX_CUSTOM_KEY_LENGTH {
        return Err(format!(
            "custom key must be at most {} characters, got {}",
            MAX_CUSTOM_KEY_LENGTH,
            key.len()
        ));
    }

    if !CUSTOM_KEY_RE.is_match(key) {
        return Err(
            "custom key can only contain lowercase letters, digits, and hyphens".to_string(),
        );
    }

    if RESERVED_KEYS.contains(&key) {
        return Err(format!("'{}' is a reserved key", key));
    }

    Ok(())
}
