//! Domain layer containing business entities and capability contracts.
//!
//! Nothing in here knows about HTTP or gRPC. Handlers and the storage gateway
//! meet at the traits defined in [`repositories`].
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Save/resolve capability traits
//! - [`errors`] - Domain error taxonomy shared by the gateway and its callers
//! - [`call_context`] - Caller deadline carried into every storage call
//!
//! # Request Flow
//!
//! 1. HTTP handler validates input and builds a [`call_context::CallContext`]
//! 2. [`crate::application::services::UrlService`] calls [`repositories::UrlSaver`]
//!    or [`repositories::UrlResolver`]
//! 3. The production binding is
//!    [`crate::infrastructure::url_storage::StorageGateway`], which talks to the
//!    remote storage service and maps failures into [`errors::StorageError`]

pub mod call_context;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use call_context::CallContext;
pub use errors::StorageError;
