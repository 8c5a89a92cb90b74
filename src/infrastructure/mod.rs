//! Infrastructure layer: key-value store backends.

pub mod store;
