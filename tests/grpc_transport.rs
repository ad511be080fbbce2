use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Code, Request, Response, Status};
use url_shortener_gateway::domain::repositories::{UrlResolver, UrlSaver};
use url_shortener_gateway::domain::{CallContext, StorageError};
use url_shortener_gateway::infrastructure::url_storage::proto::url_storage_server::{
    UrlStorage, UrlStorageServer,
};
use url_shortener_gateway::infrastructure::url_storage::proto::{
    GetUrlRequest, GetUrlResponse, SetUrlRequest, SetUrlResponse,
};
use url_shortener_gateway::infrastructure::url_storage::{
    GrpcTransport, InMemoryUrlStorage, RetryPolicy, StorageGateway, UrlStorageTransport,
};

/// gRPC server answering from an in-memory storage.
struct StorageService {
    storage: Arc<InMemoryUrlStorage>,
    timeouts: Arc<Mutex<Vec<Option<String>>>>,
}

impl StorageService {
    fn record_timeout<T>(&self, request: &Request<T>) {
        let timeout = request
            .metadata()
            .get("grpc-timeout")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.timeouts.lock().unwrap().push(timeout);
    }
}

#[tonic::async_trait]
impl UrlStorage for StorageService {
    async fn set_url(
        &self,
        request: Request<SetUrlRequest>,
    ) -> Result<Response<SetUrlResponse>, Status> {
        self.record_timeout(&request);
        self.storage
            .set_url(request.into_inner(), Duration::from_secs(1))
            .await
            .map(Response::new)
    }

    async fn get_url(
        &self,
        request: Request<GetUrlRequest>,
    ) -> Result<Response<GetUrlResponse>, Status> {
        self.record_timeout(&request);
        self.storage
            .get_url(request.into_inner(), Duration::from_secs(1))
            .await
            .map(Response::new)
    }
}

struct TestStorage {
    gateway: StorageGateway<GrpcTransport>,
    storage: Arc<InMemoryUrlStorage>,
    timeouts: Arc<Mutex<Vec<Option<String>>>>,
}

/// Serves the storage on a loopback port and connects a gateway to it.
async fn start_storage(max_attempts: u32) -> TestStorage {
    let storage = Arc::new(InMemoryUrlStorage::new());
    let timeouts = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let service = StorageService {
        storage: storage.clone(),
        timeouts: timeouts.clone(),
    };
    tokio::spawn(
        Server::builder()
            .add_service(UrlStorageServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );

    let policy = RetryPolicy::new(
        NonZeroU32::new(max_attempts).unwrap(),
        Duration::from_secs(2),
    )
    .with_backoff(Duration::from_millis(5));
    let gateway = StorageGateway::connect_with_policy(&address, Duration::from_secs(2), policy)
        .await
        .unwrap();

    TestStorage {
        gateway,
        storage,
        timeouts,
    }
}

#[tokio::test]
async fn test_grpc_save_then_resolve() {
    let test = start_storage(3).await;
    let ctx = CallContext::background();

    let id = test
        .gateway
        .save_url(&ctx, "https://example.com/a?b=c", "wire1")
        .await
        .unwrap();
    let url = test.gateway.resolve_url(&ctx, "wire1").await.unwrap();

    assert!(id > 0);
    assert_eq!(url, "https://example.com/a?b=c");
    assert_eq!(test.storage.get("wire1").unwrap().id, id);
}

#[tokio::test]
async fn test_grpc_already_exists() {
    let test = start_storage(3).await;
    test.storage.insert("https://old.example.com", "taken");

    let result = test
        .gateway
        .save_url(&CallContext::background(), "https://example.com", "taken")
        .await;

    assert!(matches!(result.unwrap_err(), StorageError::AlreadyExists));
    assert_eq!(test.storage.set_url_calls(), 1);
}

#[tokio::test]
async fn test_grpc_not_found() {
    let test = start_storage(3).await;

    let result = test
        .gateway
        .resolve_url(&CallContext::background(), "missing")
        .await;

    assert!(matches!(result.unwrap_err(), StorageError::NotFound));
    assert_eq!(test.storage.get_url_calls(), 1);
}

#[tokio::test]
async fn test_grpc_aborted_then_ok_takes_two_attempts() {
    let test = start_storage(3).await;
    test.storage.fail_next(Code::Aborted, 1);

    let result = test
        .gateway
        .save_url(&CallContext::background(), "https://example.com", "retry")
        .await;

    assert!(result.is_ok());
    assert_eq!(test.storage.set_url_calls(), 2);
}

#[tokio::test]
async fn test_grpc_unavailable_is_internal() {
    let test = start_storage(3).await;
    test.storage.fail_next(Code::Unavailable, 1);

    let result = test
        .gateway
        .resolve_url(&CallContext::background(), "anything")
        .await;

    assert!(matches!(result.unwrap_err(), StorageError::Internal { .. }));
    assert_eq!(test.storage.get_url_calls(), 1);
}

#[tokio::test]
async fn test_grpc_attempt_timeout_is_sent() {
    let test = start_storage(3).await;
    test.storage.insert("https://example.com", "timed");

    test.gateway
        .resolve_url(&CallContext::background(), "timed")
        .await
        .unwrap();

    let timeouts = test.timeouts.lock().unwrap();
    assert_eq!(timeouts.len(), 1);
    assert!(timeouts[0].is_some());
}
