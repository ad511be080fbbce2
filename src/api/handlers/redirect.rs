//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::CallContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `302 Found` with the `Location` header set to the stored URL.
///
/// # Errors
///
/// Returns 404 Not Found if the alias has no mapping.
/// Returns 500 Internal Server Error on storage failure or when the stored
/// URL cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let ctx = CallContext::with_timeout(state.call_timeout);
    let url = state.url_service.resolve(&ctx, &alias).await?;

    let location = HeaderValue::try_from(url).map_err(|e| {
        tracing::error!(%alias, error = %e, "Stored url is not a valid Location header");
        AppError::internal(format!("invalid location for alias {alias}: {e}"))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
