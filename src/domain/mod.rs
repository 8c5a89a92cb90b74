//! Domain layer containing core entities and the key-value store abstraction.

pub mod short_link;
pub mod store;
