//! API route configuration.

use crate::api::handlers::{redirect_handler, save_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /url`      - Store a URL under an alias
/// - `GET  /{alias}`  - Redirect to the URL stored under `alias`
///
/// `/url` only answers `POST`, so an alias named `url` cannot be resolved.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(save_url_handler))
        .route("/{alias}", get(redirect_handler))
}
