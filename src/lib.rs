//! # Snaplink
//!
//! A small URL shortening service built with Axum and Redis.
//!
//! ## Architecture
//!
//! The crate follows a layered structure with clear separation of concerns:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the key-value store trait
//! - **Application Layer** ([`application`]) - Key allocation, rate limiting, QR rendering
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory store backends
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Collision-tolerant short key allocation with a bounded retry budget
//! - Custom short keys with conflict detection
//! - Sliding-window rate limiting backed by the same key-value store
//! - Deterministic SVG QR code rendering with an adaptively sized caption
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: point at Redis; without it an in-memory store is used
//! export REDIS_URL="redis://localhost:6379"
//! export BASE_URL="https://s.example.com"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CodeImageRenderer, Decision, KeyAllocator, RateLimiter,
    };
    pub use crate::domain::store::KeyValueStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
