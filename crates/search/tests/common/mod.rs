//! In-memory mirror node shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ledgerscope_search::{
    MirrorTransport, NetworkConfig, SearchEngine, SearchError, StaticDomainNames,
};
use serde_json::{json, Value};

#[derive(Default)]
pub struct FakeMirror {
    responses: HashMap<String, (Value, Option<Duration>)>,
    failures: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl FakeMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), (body, None));
        self
    }

    /// Answers `path` only after `delay`.
    pub fn with_delayed(mut self, path: &str, body: Value, delay: Duration) -> Self {
        self.responses.insert(path.to_string(), (body, Some(delay)));
        self
    }

    pub fn failing(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MirrorTransport for FakeMirror {
    async fn get(&self, path: &str) -> Result<Value, SearchError> {
        self.calls.lock().unwrap().push(path.to_string());

        if let Some(status) = self.failures.get(path) {
            return Err(SearchError::MirrorNode {
                path: path.to_string(),
                status: *status,
                message: "fake failure".to_string(),
            });
        }
        match self.responses.get(path) {
            Some((body, delay)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(*delay).await;
                }
                Ok(body.clone())
            }
            None => Err(SearchError::NotFound {
                path: path.to_string(),
            }),
        }
    }
}

pub fn engine(mirror: &Arc<FakeMirror>, names: StaticDomainNames) -> SearchEngine {
    SearchEngine::with_transport(NetworkConfig::mainnet(), mirror.clone(), Arc::new(names))
}

pub fn account(id: &str) -> Value {
    json!({ "account": id, "deleted": false, "memo": "", "balance": { "balance": 5 } })
}
