//! DTOs for the alias creation endpoint.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

/// Request to store a URL under an alias.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveUrlRequest {
    /// Destination URL. Must be a syntactically valid absolute URL.
    ///
    /// Defaults to empty when missing so the omission is reported as a
    /// validation error on `url` rather than a decoding failure.
    #[serde(default)]
    #[validate(custom(function = "validate_absolute_url"))]
    pub url: String,

    /// Alias to use as-is. A random one is generated when absent or empty.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Successful response carrying the alias actually stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveUrlResponse {
    pub alias: String,
}

fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(
            ValidationError::new("required").with_message("field url is a required field".into())
        );
    }

    let invalid =
        || ValidationError::new("url").with_message("field url is not a valid URL".into());

    // The raw value is stored and later sent back as `Location`; reject what
    // the parser would silently strip.
    if value.chars().any(char::is_control) || value.trim() != value {
        return Err(invalid());
    }

    Url::parse(value).map(|_| ()).map_err(|_| invalid())
}
