//! Application layer orchestrating domain operations over the store.

pub mod services;
