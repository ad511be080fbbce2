//! # URL Shortener Gateway
//!
//! HTTP front end of a URL shortener whose mappings live in a remote URL
//! storage service reached over gRPC.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Call context, storage errors, capability traits
//! - **Application Layer** ([`application`]) - Alias generation and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Storage gateway with bounded retries
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 8-character aliases or caller-chosen ones
//! - Bounded retries of transient storage failures under a caller deadline
//! - Request-scoped structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! export URL_STORAGE_ADDRESS="localhost:50051"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

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
    pub use crate::application::services::UrlService;
    pub use crate::domain::{CallContext, StorageError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::url_storage::{InMemoryUrlStorage, RetryPolicy, StorageGateway};
    pub use crate::state::AppState;
}
