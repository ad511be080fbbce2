//! Resilient gateway to the remote URL storage service.

use super::proto::{GetUrlRequest, SetUrlRequest};
use super::retry::RetryPolicy;
use super::transport::{ConnectionError, GrpcTransport, UrlStorageTransport};
use crate::domain::repositories::{UrlResolver, UrlSaver};
use crate::domain::{CallContext, StorageError};
use async_trait::async_trait;
use metrics::counter;
use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio_retry::RetryIf;
use tonic::{Code, Status};
use tracing::{debug, error, info, warn};

const SAVE_URL_OP: &str = "url_storage.save_url";
const RESOLVE_URL_OP: &str = "url_storage.resolve_url";

/// Turns save/resolve calls into remote calls with bounded retries.
///
/// # Retry Algorithm
///
/// Each call makes up to `max_attempts` sequential attempts. An attempt that
/// fails with a code in the policy's retryable set is repeated after a short
/// jittered pause; any other outcome is returned at once. Domain signals
/// (`AlreadyExists` on save, `NotFound` on resolve) are never retried.
///
/// # Deadlines and Cancellation
///
/// - Every attempt is bounded by `min(per_attempt_timeout, time left on the
///   caller's deadline)`; the same bound is sent as the gRPC timeout header.
/// - When the caller's deadline passes, retrying stops immediately, even in
///   the middle of a pause, and the call fails with [`StorageError::Internal`].
/// - Dropping the returned future abandons the call; no queued attempt runs.
///
/// # Concurrency
///
/// The gateway holds no per-request state and is shared behind an `Arc` by all
/// handlers; the gRPC transport multiplexes calls over one channel.
#[derive(Debug)]
pub struct StorageGateway<T = GrpcTransport> {
    transport: T,
    policy: RetryPolicy,
}

impl StorageGateway<GrpcTransport> {
    /// Connects to the storage service at `address`.
    ///
    /// `timeout` bounds the dial and doubles as the per-attempt timeout;
    /// `max_attempts` is the total number of attempts per call.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError`] if the service cannot be dialed in time.
    pub async fn connect(
        address: &str,
        timeout: Duration,
        max_attempts: NonZeroU32,
    ) -> Result<Self, ConnectionError> {
        Self::connect_with_policy(address, timeout, RetryPolicy::new(max_attempts, timeout)).await
    }

    /// Connects with a fully specified retry policy.
    ///
    /// # Errors
    ///
    /// See [`Self::connect`].
    pub async fn connect_with_policy(
        address: &str,
        dial_timeout: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, ConnectionError> {
        let transport = GrpcTransport::connect(address, dial_timeout).await?;
        Ok(Self::new(transport, policy))
    }
}

impl<T: UrlStorageTransport> StorageGateway<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs `attempt` under the retry policy and the caller's deadline.
    ///
    /// Returns the final outcome together with the number of attempts made.
    async fn call<R, F, Fut>(
        &self,
        op: &'static str,
        ctx: &CallContext,
        mut attempt: F,
    ) -> (Result<R, Status>, u32)
    where
        F: FnMut(Duration) -> Fut + Send,
        Fut: Future<Output = Result<R, Status>> + Send,
        R: Send,
    {
        if ctx.is_expired() {
            return (
                Err(Status::deadline_exceeded("caller deadline exceeded")),
                0,
            );
        }

        let policy = &self.policy;
        let mut attempts: u32 = 0;

        let action = || {
            attempts += 1;
            let number = attempts;
            let budget = ctx.clamp(policy.per_attempt_timeout());
            let pending = attempt(budget);

            async move {
                counter!("url_storage_attempts_total", "op" => op).increment(1);

                let result = match tokio::time::timeout(budget, pending).await {
                    Ok(result) => result,
                    Err(_) => Err(Status::deadline_exceeded(format!(
                        "attempt timed out after {budget:?}"
                    ))),
                };

                if let Err(status) = &result {
                    if policy.is_retryable(status.code()) {
                        warn!(op, attempt = number, code = ?status.code(), detail = status.message(), "Retryable storage failure");
                    } else {
                        debug!(op, attempt = number, code = ?status.code(), "Storage attempt failed");
                    }
                }

                result
            }
        };

        let condition = |status: &Status| policy.is_retryable(status.code()) && !ctx.is_expired();

        let retry = RetryIf::start(policy.delays(), action, condition);

        let outcome = match ctx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, retry)
                .await
                .unwrap_or_else(|_| Err(Status::deadline_exceeded("caller deadline exceeded"))),
            None => retry.await,
        };

        (outcome, attempts)
    }
}

#[async_trait]
impl<T: UrlStorageTransport> UrlSaver for StorageGateway<T> {
    async fn save_url(
        &self,
        ctx: &CallContext,
        url: &str,
        alias: &str,
    ) -> Result<i64, StorageError> {
        let request = SetUrlRequest {
            url: url.to_owned(),
            alias: alias.to_owned(),
        };
        debug!(op = SAVE_URL_OP, url, alias, "Sending storage request");

        let (result, attempts) = self
            .call(SAVE_URL_OP, ctx, |timeout| {
                self.transport.set_url(request.clone(), timeout)
            })
            .await;

        match result {
            Ok(response) => {
                record_outcome(SAVE_URL_OP, "ok");
                info!(op = SAVE_URL_OP, alias, id = response.id, attempts, "Url saved");
                Ok(response.id)
            }
            Err(status) if status.code() == Code::AlreadyExists => {
                record_outcome(SAVE_URL_OP, "already_exists");
                info!(op = SAVE_URL_OP, alias, attempts, "Alias already exists");
                Err(StorageError::AlreadyExists)
            }
            Err(status) => {
                record_outcome(SAVE_URL_OP, "error");
                error!(op = SAVE_URL_OP, alias, attempts, code = ?status.code(), detail = status.message(), "Failed to save url");
                Err(StorageError::internal(SAVE_URL_OP, status))
            }
        }
    }
}

#[async_trait]
impl<T: UrlStorageTransport> UrlResolver for StorageGateway<T> {
    async fn resolve_url(&self, ctx: &CallContext, alias: &str) -> Result<String, StorageError> {
        let request = GetUrlRequest {
            alias: alias.to_owned(),
        };
        debug!(op = RESOLVE_URL_OP, alias, "Sending storage request");

        let (result, attempts) = self
            .call(RESOLVE_URL_OP, ctx, |timeout| {
                self.transport.get_url(request.clone(), timeout)
            })
            .await;

        match result {
            Ok(response) => {
                record_outcome(RESOLVE_URL_OP, "ok");
                info!(op = RESOLVE_URL_OP, alias, url = %response.url, attempts, "Url resolved");
                Ok(response.url)
            }
            Err(status) if status.code() == Code::NotFound => {
                record_outcome(RESOLVE_URL_OP, "not_found");
                info!(op = RESOLVE_URL_OP, alias, attempts, "Url not found");
                Err(StorageError::NotFound)
            }
            Err(status) => {
                record_outcome(RESOLVE_URL_OP, "error");
                error!(op = RESOLVE_URL_OP, alias, attempts, code = ?status.code(), detail = status.message(), "Failed to resolve url");
                Err(StorageError::internal(RESOLVE_URL_OP, status))
            }
        }
    }
}

fn record_outcome(op: &'static str, outcome: &'static str) {
    counter!("url_storage_calls_total", "op" => op, "outcome" => outcome).increment(1);
}
