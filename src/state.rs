use std::sync::Arc;
use std::time::Duration;

use crate::application::services::UrlService;
use crate::domain::repositories::{UrlResolver, UrlSaver};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    /// Deadline given to each storage call made while serving a request.
    pub call_timeout: Duration,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, call_timeout: Duration) -> Self {
        Self {
            url_service,
            call_timeout,
        }
    }

    /// Builds the state around one storage backend serving both capabilities.
    pub fn from_storage<S>(storage: Arc<S>, call_timeout: Duration) -> Self
    where
        S: UrlSaver + UrlResolver + 'static,
    {
        let url_service = UrlService::new(storage.clone(), storage);
        Self::new(Arc::new(url_service), call_timeout)
    }
}
