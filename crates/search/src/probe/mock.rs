//! Shared fixtures for probe tests.

use std::sync::Arc;

use serde_json::{json, Value};

use super::ProbeContext;
use crate::mirror::mock::MockTransport;
use crate::mirror::MirrorNode;
use crate::models::NetworkConfig;

pub fn context(transport: &MockTransport) -> ProbeContext {
    ProbeContext::new(
        MirrorNode::new(Arc::new(transport.clone())),
        NetworkConfig::mainnet(),
    )
}

pub fn account(id: &str) -> Value {
    json!({ "account": id, "deleted": false, "balance": { "balance": 1000 } })
}

pub fn transactions(id: &str, timestamp: &str) -> Value {
    json!({ "transactions": [{
        "transaction_id": id,
        "consensus_timestamp": timestamp,
        "name": "CRYPTOTRANSFER",
        "result": "SUCCESS",
        "nonce": 0
    }] })
}
