//! Transport seam between the gateway and the remote storage service.

use super::proto::url_storage_client::UrlStorageClient;
use super::proto::{GetUrlRequest, GetUrlResponse, SetUrlRequest, SetUrlResponse};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::{debug, info};

/// Errors raised while establishing the storage connection.
///
/// Fatal at startup: the process must not serve traffic without a gateway.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid url storage address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("timed out after {timeout:?} connecting to url storage at '{address}'")]
    Timeout { address: String, timeout: Duration },

    #[error("failed to connect to url storage at '{address}': {source}")]
    Dial {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
}

/// One raw attempt against the storage service.
///
/// Implementations perform exactly one remote call per invocation and report
/// failures as gRPC [`Status`] values; retrying and error mapping belong to
/// [`super::StorageGateway`]. `timeout` is the budget of this attempt.
#[async_trait]
pub trait UrlStorageTransport: Send + Sync {
    async fn set_url(
        &self,
        request: SetUrlRequest,
        timeout: Duration,
    ) -> Result<SetUrlResponse, Status>;

    async fn get_url(
        &self,
        request: GetUrlRequest,
        timeout: Duration,
    ) -> Result<GetUrlResponse, Status>;
}

/// gRPC transport over a single shared HTTP/2 channel.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: UrlStorageClient<Channel>,
}

impl GrpcTransport {
    /// Dials the storage service, giving up after `timeout`.
    ///
    /// `address` may be a bare `host:port`, in which case plaintext `http://`
    /// is assumed.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the address is malformed, the endpoint
    /// refuses the connection, or the dial does not finish within `timeout`.
    pub async fn connect(address: &str, timeout: Duration) -> Result<Self, ConnectionError> {
        let address = normalize_address(address);
        debug!(%address, ?timeout, "Dialing url storage");

        let endpoint = Endpoint::from_shared(address.clone())
            .map_err(|source| ConnectionError::InvalidAddress {
                address: address.clone(),
                source,
            })?
            .connect_timeout(timeout);

        let channel = tokio::time::timeout(timeout, endpoint.connect())
            .await
            .map_err(|_| ConnectionError::Timeout {
                address: address.clone(),
                timeout,
            })?
            .map_err(|source| ConnectionError::Dial {
                address: address.clone(),
                source,
            })?;

        info!(%address, "Connected to url storage");

        Ok(Self {
            client: UrlStorageClient::new(channel),
        })
    }
}

#[async_trait]
impl UrlStorageTransport for GrpcTransport {
    async fn set_url(
        &self,
        request: SetUrlRequest,
        timeout: Duration,
    ) -> Result<SetUrlResponse, Status> {
        let mut request = Request::new(request);
        request.set_timeout(timeout);

        let mut client = self.client.clone();
        Ok(client.set_url(request).await?.into_inner())
    }

    async fn get_url(
        &self,
        request: GetUrlRequest,
        timeout: Duration,
    ) -> Result<GetUrlResponse, Status> {
        let mut request = Request::new(request);
        request.set_timeout(timeout);

        let mut client = self.client.clone();
        Ok(client.get_url(request).await?.into_inner())
    }
}

/// Prefixes `http://` when `address` carries no scheme.
fn normalize_address(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}
