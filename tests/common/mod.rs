#![allow(dead_code)]

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use url_shortener_gateway::infrastructure::url_storage::{
    InMemoryUrlStorage, RetryPolicy, StorageGateway,
};
use url_shortener_gateway::routes::app_router;
use url_shortener_gateway::state::AppState;

pub type TestGateway = StorageGateway<InMemoryUrlStorage>;

pub const CALL_TIMEOUT: Duration = Duration::from_secs(2);

pub fn test_policy(max_attempts: u32) -> RetryPolicy {
    let max_attempts = NonZeroU32::new(max_attempts).expect("max_attempts must be positive");
    RetryPolicy::new(max_attempts, Duration::from_millis(500))
        .with_backoff(Duration::from_millis(5))
}

/// Builds state over an in-memory storage; the gateway is returned for inspection.
pub fn create_test_state(max_attempts: u32) -> (AppState, Arc<TestGateway>) {
    let gateway = Arc::new(StorageGateway::new(
        InMemoryUrlStorage::new(),
        test_policy(max_attempts),
    ));
    let state = AppState::from_storage(gateway.clone(), CALL_TIMEOUT);
    (state, gateway)
}

pub fn make_server(router: Router) -> TestServer {
    TestServer::new(router).unwrap()
}

/// Full application router, middleware included.
pub fn make_app_server(max_attempts: u32) -> (TestServer, Arc<TestGateway>) {
    let (state, gateway) = create_test_state(max_attempts);
    (make_server(app_router(state)), gateway)
}
