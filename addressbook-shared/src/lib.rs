//! # Address Book Shared Library
//!
//! Data model and storage for the address book service.
//!
//! ## Module Organization
//!
//! - `ids`: datastore key format checks
//! - `models`: users, addresses and their Postgres operations
//! - `store`: the `AddressStore` seam with Postgres and in-memory backends
//! - `db`: connection pool and migrations

pub mod db;
pub mod ids;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
