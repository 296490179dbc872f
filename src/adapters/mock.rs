//! Canned-response transport for tests.
//!
//! A `MockRegistry` maps URLs to an `(error, data, response)` triple. The
//! `MockTransport` replays that triple in the order a streaming transport
//! would: response metadata, body bytes, error, then finish. URLs that were
//! never registered deliver nothing at all.

use crate::core::transport::ResponseAssembler;
use crate::domain::http::{RequestDescriptor, TransportResult};
use crate::domain::ports::Transport;
use crate::utils::error::TransportFailure;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

impl MockResponse {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone, Default)]
struct MockEntry {
    error: Option<TransportFailure>,
    data: Option<Vec<u8>>,
    response: Option<MockResponse>,
}

#[derive(Debug, Default)]
struct RegistryState {
    entries: HashMap<String, MockEntry>,
    requests: Vec<String>,
}

/// Shared table of canned results. Clones see the same table.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers (or replaces) the triple served for `url`.
    pub fn register(
        &self,
        url: &str,
        error: Option<TransportFailure>,
        data: Option<Vec<u8>>,
        response: Option<MockResponse>,
    ) {
        self.lock().entries.insert(
            normalize(url),
            MockEntry {
                error,
                data,
                response,
            },
        );
    }

    pub fn register_json(&self, url: &str, status: u16, body: &serde_json::Value) {
        self.register(
            url,
            None,
            Some(body.to_string().into_bytes()),
            Some(MockResponse::status(status).with_header("content-type", "application/json")),
        );
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.requests.clear();
    }

    /// Every URL sent through a transport bound to this registry, in order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn hits(&self, url: &str) -> usize {
        let url = normalize(url);
        self.lock().requests.iter().filter(|r| **r == url).count()
    }

    fn lookup(&self, url: &str) -> Option<MockEntry> {
        let mut state = self.lock();
        state.requests.push(url.to_string());
        state.entries.get(url).cloned()
    }
}

/// Parses and re-serializes so `http://a.test` and `http://a.test/` match.
fn normalize(url: &str) -> String {
    url::Url::parse(url)
        .map(|parsed| parsed.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    registry: MockRegistry,
}

impl MockTransport {
    pub fn new(registry: MockRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestDescriptor) -> TransportResult {
        let entry = self.registry.lookup(request.url.as_str());
        tokio::task::yield_now().await;

        let mut assembler = ResponseAssembler::new();
        if let Some(entry) = entry {
            if let Some(response) = entry.response {
                assembler.receive_response(response.status, response.headers);
            }
            if let Some(data) = entry.data {
                assembler.receive_data(&data);
            }
            if let Some(error) = entry.error {
                assembler.fail(error);
            }
        }
        assembler.finish()
    }
}
