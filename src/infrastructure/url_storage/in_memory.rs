//! In-process stand-in for the remote URL storage service.

use super::proto::{GetUrlRequest, GetUrlResponse, SetUrlRequest, SetUrlResponse};
use super::transport::UrlStorageTransport;
use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tonic::{Code, Status};

/// Scripted failure served instead of a real answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail the attempt with this status code.
    Status(Code),
    /// Never answer; the caller's attempt timeout has to fire.
    Stall,
}

#[derive(Debug, Default)]
struct State {
    records: HashMap<String, UrlRecord>,
    next_id: i64,
    faults: VecDeque<Fault>,
}

/// Storage transport keeping records in a map.
///
/// Behaves like the remote service: it enforces alias uniqueness with
/// `ALREADY_EXISTS` and reports unknown aliases with `NOT_FOUND`. Queued
/// [`Fault`]s are consumed one per call, in order, before any real work, which
/// lets tests script transient failures deterministically.
#[derive(Debug, Default)]
pub struct InMemoryUrlStorage {
    state: Mutex<State>,
    set_url_calls: AtomicU32,
    get_url_calls: AtomicU32,
}

impl InMemoryUrlStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record directly, bypassing fault injection and counters.
    ///
    /// Returns the assigned id. An existing record under `alias` is replaced.
    pub fn insert(&self, url: &str, alias: &str) -> i64 {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.records.insert(
            alias.to_string(),
            UrlRecord::new(id, url.to_string(), alias.to_string()),
        );
        id
    }

    pub fn get(&self, alias: &str) -> Option<UrlRecord> {
        self.lock().records.get(alias).cloned()
    }

    /// Queues `times` failures with `code`.
    pub fn fail_next(&self, code: Code, times: usize) {
        let mut state = self.lock();
        state
            .faults
            .extend(std::iter::repeat_n(Fault::Status(code), times));
    }

    /// Queues `times` calls that never answer.
    pub fn stall_next(&self, times: usize) {
        let mut state = self.lock();
        state
            .faults
            .extend(std::iter::repeat_n(Fault::Stall, times));
    }

    /// Number of `SetUrl` calls received, faulted ones included.
    pub fn set_url_calls(&self) -> u32 {
        self.set_url_calls.load(Ordering::SeqCst)
    }

    /// Number of `GetUrl` calls received, faulted ones included.
    pub fn get_url_calls(&self) -> u32 {
        self.get_url_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned map is still consistent: every mutation is a single insert.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_fault(&self) -> Option<Fault> {
        self.lock().faults.pop_front()
    }
}

/// Serves a queued fault, if any.
async fn serve_fault(fault: Option<Fault>) -> Result<(), Status> {
    match fault {
        None => Ok(()),
        Some(Fault::Status(code)) => Err(Status::new(code, "injected fault")),
        Some(Fault::Stall) => std::future::pending().await,
    }
}

#[async_trait]
impl UrlStorageTransport for InMemoryUrlStorage {
    async fn set_url(
        &self,
        request: SetUrlRequest,
        _timeout: Duration,
    ) -> Result<SetUrlResponse, Status> {
        self.set_url_calls.fetch_add(1, Ordering::SeqCst);
        serve_fault(self.next_fault()).await?;

        let mut state = self.lock();
        if state.records.contains_key(&request.alias) {
            return Err(Status::already_exists("url with this alias already exists"));
        }

        state.next_id += 1;
        let id = state.next_id;
        state.records.insert(
            request.alias.clone(),
            UrlRecord::new(id, request.url, request.alias),
        );

        Ok(SetUrlResponse { id })
    }

    async fn get_url(
        &self,
        request: GetUrlRequest,
        _timeout: Duration,
    ) -> Result<GetUrlResponse, Status> {
        self.get_url_calls.fetch_add(1, Ordering::SeqCst);
        serve_fault(self.next_fault()).await?;

        self.lock()
            .records
            .get(&request.alias)
            .map(|record| GetUrlResponse {
                url: record.url.clone(),
            })
            .ok_or_else(|| Status::not_found("url not found"))
    }
}
