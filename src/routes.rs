//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /url`      - Alias creation
//! - `GET  /{alias}`  - Alias redirect
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Request id** - Assigns `x-request-id` when absent
//! - **Propagation** - Echoes `x-request-id` on the response
//! - **Tracing** - Structured request/response logging, one span per request
//! - **Panic recovery** - Converts handler panics into `500`

use crate::api;
use crate::api::middleware::{recover, request_id, tracing};
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
///
/// Trailing-slash normalisation is applied by [`crate::server::run`] around
/// the returned router.
pub fn app_router(state: AppState) -> Router {
    api::routes::public_routes()
        .with_state(state)
        .layer(recover::layer())
        .layer(tracing::layer())
        .layer(request_id::propagate_layer())
        .layer(request_id::set_layer())
}
