//! Handler for alias creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::save_url::{SaveUrlRequest, SaveUrlResponse};
use crate::domain::CallContext;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL under a caller-chosen or generated alias.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "alias": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "alias": "my-link" }
/// ```
///
/// When `alias` is omitted an 8-character alphanumeric alias is generated.
///
/// # Errors
///
/// - 400 Bad Request if the body cannot be decoded or `url` is invalid
/// - 409 Conflict if the alias is already taken
/// - 500 Internal Server Error on storage failure
pub async fn save_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<Json<SaveUrlResponse>, AppError> {
    let Json(payload) = payload?;

    tracing::debug!(request = ?payload, "Request body decoded");

    payload.validate()?;

    let ctx = CallContext::with_timeout(state.call_timeout);
    let alias = state
        .url_service
        .shorten(&ctx, &payload.url, payload.alias)
        .await?;

    Ok(Json(SaveUrlResponse { alias }))
}
