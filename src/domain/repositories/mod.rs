//! Capability traits through which handlers reach URL storage.
//!
//! Handlers depend only on these two narrow contracts. Production binds both to
//! [`crate::infrastructure::url_storage::StorageGateway`]; unit tests use the
//! `mockall` mocks generated under `cfg(test)`.

pub mod url_repository;

pub use url_repository::{UrlResolver, UrlSaver};

#[cfg(test)]
pub use url_repository::{MockUrlResolver, MockUrlSaver};
