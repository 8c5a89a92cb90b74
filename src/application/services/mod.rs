//! Application services.
//!
//! - [`key_allocator`] - Collision-tolerant short key allocation
//! - [`rate_limiter`] - Store-backed sliding-window rate limiting
//! - [`code_image`] - Deterministic QR code SVG rendering

pub mod code_image;
pub mod key_allocator;
pub mod rate_limiter;

pub use code_image::{CodeImage, CodeImageRenderer, RenderConfig, RenderError};
pub use key_allocator::{AllocError, KeyAllocator};
pub use rate_limiter::{Decision, RateLimitError, RateLimiter};
