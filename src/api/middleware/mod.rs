//! HTTP middleware for request processing.
//!
//! Provides request identification, panic recovery, and observability middleware.

pub mod recover;
pub mod request_id;
pub mod tracing;
