//! Domain error taxonomy for storage operations.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a failed save or resolve.
///
/// Retryable transport failures never show up here: the gateway either turns
/// them into a success or, once its retry budget is spent, into
/// [`StorageError::Internal`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The alias has no mapping.
    #[error("url not found")]
    NotFound,

    /// The alias is already mapped to some URL.
    #[error("alias already exists")]
    AlreadyExists,

    /// Opaque failure. The source is for logs only and must not reach clients.
    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StorageError {
    /// Wraps `source` as an internal failure of operation `op`.
    pub fn internal(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            op,
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }
}
