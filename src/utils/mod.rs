//! Utility functions for key generation, URL processing, and request handling.
//!
//! - [`key_gen`] - Random short key generation and custom key validation
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`client_identity`] - Rate-limit identity derivation from HTTP headers

pub mod client_identity;
pub mod key_gen;
pub mod url_normalizer;
