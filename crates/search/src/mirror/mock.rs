//! In-memory [`MirrorTransport`] for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use super::transport::MirrorTransport;
use crate::errors::SearchError;

#[derive(Clone)]
enum MockResponse {
    Json(Value),
    Status(u16),
}

#[derive(Default)]
struct Inner {
    responses: HashMap<String, MockResponse>,
    gates: HashMap<String, Arc<Semaphore>>,
    calls: Mutex<Vec<String>>,
}

/// Answers registered paths; every other path is a 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner_mut(&mut self) -> &mut Inner {
        Arc::get_mut(&mut self.inner).expect("configure MockTransport before sharing it")
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.inner_mut()
            .responses
            .insert(path.to_string(), MockResponse::Json(body));
        self
    }

    /// Answers `path` with a non-success status.
    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.inner_mut()
            .responses
            .insert(path.to_string(), MockResponse::Status(status));
        self
    }

    /// Holds responses for `path` until the returned gate gets a permit.
    pub fn with_gate(mut self, path: &str) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.inner_mut().gates.insert(path.to_string(), gate.clone());
        (self, gate)
    }

    /// Paths requested so far, in request order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MirrorTransport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, SearchError> {
        self.inner.calls.lock().unwrap().push(path.to_string());

        if let Some(gate) = self.inner.gates.get(path) {
            let _permit = gate.acquire().await.unwrap();
        }

        match self.inner.responses.get(path) {
            Some(MockResponse::Json(body)) => Ok(body.clone()),
            Some(MockResponse::Status(404)) | None => Err(SearchError::NotFound {
                path: path.to_string(),
            }),
            Some(MockResponse::Status(status)) => Err(SearchError::MirrorNode {
                path: path.to_string(),
                status: *status,
                message: "mock failure".to_string(),
            }),
        }
    }
}
