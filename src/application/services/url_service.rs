//! Alias creation and resolution service.

use std::sync::Arc;

use crate::domain::repositories::{UrlResolver, UrlSaver};
use crate::domain::{CallContext, StorageError};
use crate::error::AppError;
use crate::utils::alias::{ALIAS_LENGTH, generate_alias};
use tracing::{error, info};

/// Service for storing and resolving short aliases.
///
/// Holds the two storage capabilities separately so tests can mock each one.
/// No local collision check is made for generated aliases: a clash comes back
/// from storage as a conflict like any other taken alias.
#[derive(Clone)]
pub struct UrlService {
    saver: Arc<dyn UrlSaver>,
    resolver: Arc<dyn UrlResolver>,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(saver: Arc<dyn UrlSaver>, resolver: Arc<dyn UrlResolver>) -> Self {
        Self { saver, resolver }
    }

    /// Stores `url` under `alias`, or under a generated alias when `alias` is
    /// absent or empty. Returns the alias actually used.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on any other storage failure.
    pub async fn shorten(
        &self,
        ctx: &CallContext,
        url: &str,
        alias: Option<String>,
    ) -> Result<String, AppError> {
        let alias = alias
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| generate_alias(ALIAS_LENGTH));

        match self.saver.save_url(ctx, url, &alias).await {
            Ok(id) => {
                info!(id, %alias, "Url added");
                Ok(alias)
            }
            Err(StorageError::AlreadyExists) => {
                info!(%alias, "Alias already exists");
                Err(StorageError::AlreadyExists.into())
            }
            Err(e) => {
                error!(error = %e, "Failed to add url");
                Err(e.into())
            }
        }
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is unknown.
    /// Returns [`AppError::Internal`] on any other storage failure.
    pub async fn resolve(&self, ctx: &CallContext, alias: &str) -> Result<String, AppError> {
        match self.resolver.resolve_url(ctx, alias).await {
            Ok(url) => {
                info!(%alias, %url, "Got url");
                Ok(url)
            }
            Err(StorageError::NotFound) => {
                info!(%alias, "Url not found");
                Err(StorageError::NotFound.into())
            }
            Err(e) => {
                error!(error = %e, "Failed to get url");
                Err(e.into())
            }
        }
    }
}
