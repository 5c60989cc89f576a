//! # PawFund Shared Library
//!
//! This crate contains the data models and local persistence layer shared
//! across the PawFund services.
//!
//! ## Module Organization
//!
//! - `models`: persisted entity types and per-entity store operations
//! - `store`: the directory-backed JSON document store

pub mod models;
pub mod store;

/// Current version of the PawFund shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
