//! Access to the remote URL storage service.
//!
//! - [`StorageGateway`] - Retry, deadline and error-mapping policy; implements
//!   [`crate::domain::repositories::UrlSaver`] and
//!   [`crate::domain::repositories::UrlResolver`]
//! - [`RetryPolicy`] - Immutable retry configuration
//! - [`UrlStorageTransport`] - One raw attempt against the service
//! - [`GrpcTransport`] - Production transport over `tonic`
//! - [`InMemoryUrlStorage`] - In-process transport with fault injection

mod gateway;
mod in_memory;
pub mod proto;
mod retry;
mod transport;

pub use gateway::StorageGateway;
pub use in_memory::{Fault, InMemoryUrlStorage};
pub use retry::{DEFAULT_BACKOFF, DEFAULT_RETRYABLE_CODES, RetryPolicy};
pub use transport::{ConnectionError, GrpcTransport, UrlStorageTransport};
