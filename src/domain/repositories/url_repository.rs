//! Save and resolve capability contracts.

use crate::domain::{CallContext, StorageError};
use async_trait::async_trait;

/// Persists alias to URL mappings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSaver: Send + Sync {
    /// Stores `url` under `alias` and returns the record identifier.
    ///
    /// Both arguments are expected to be non-empty and already validated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] if `alias` is taken.
    /// Returns [`StorageError::Internal`] for anything else.
    async fn save_url(&self, ctx: &CallContext, url: &str, alias: &str)
    -> Result<i64, StorageError>;
}

/// Looks up the URL mapped to an alias.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if `alias` has no mapping.
    /// Returns [`StorageError::Internal`] for anything else.
    async fn resolve_url(&self, ctx: &CallContext, alias: &str) -> Result<String, StorageError>;
}
