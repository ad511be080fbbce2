//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`url_storage`] - Gateway to the remote URL storage service over gRPC

pub mod url_storage;
