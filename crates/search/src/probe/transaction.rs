//! Transaction probe.
//!
//! Four entry shapes:
//! - transaction id: `GET /transactions/{normalized id}`
//! - consensus timestamp: `GET /transactions?timestamp=`, first entry
//! - 32-byte EVM hash: contract result for its consensus timestamp, then the
//!   timestamp lookup
//! - 48-byte native hash: `GET /transactions/{hash}`

use async_trait::async_trait;
use log::debug;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::mirror::models::TransactionRecord;
use crate::models::{
    Candidate, Entity, Identifier, ProbeKind, Route, Timestamp, EVM_HASH_LEN, NATIVE_HASH_LEN,
};

pub struct TransactionProbe {
    ctx: ProbeContext,
}

impl TransactionProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    async fn at_timestamp(&self, timestamp: &Timestamp) -> Result<Option<Candidate>, SearchError> {
        let transactions = self
            .ctx
            .mirror
            .transactions_at(timestamp)
            .await
            .found()?
            .unwrap_or_default();
        Ok(transactions.into_iter().next().map(transaction_candidate))
    }

    async fn by_id_or_hash(&self, key: &str) -> Result<Option<Candidate>, SearchError> {
        let transactions = self
            .ctx
            .mirror
            .transactions(key)
            .await
            .found()?
            .unwrap_or_default();
        Ok(pick_parent(transactions).map(transaction_candidate))
    }

    async fn by_evm_hash(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Some(result) = self.ctx.mirror.contract_result(hash).await.found()? else {
            return Ok(None);
        };
        let timestamp =
            Timestamp::parse(&result.timestamp).ok_or_else(|| SearchError::MalformedResponse {
                path: format!("/contracts/results/{}", hash),
                message: format!("invalid timestamp {}", result.timestamp),
            })?;

        if cancel.is_cancelled() {
            debug!("EVM hash lookup for {} cancelled before timestamp lookup", hash);
            return Ok(None);
        }
        self.at_timestamp(&timestamp).await
    }
}

#[async_trait]
impl EntityProbe for TransactionProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Transaction
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::TransactionId(_) | Identifier::Timestamp(_) => true,
            Identifier::ByteSequence(bytes) => {
                bytes.len() == EVM_HASH_LEN || bytes.len() == NATIVE_HASH_LEN
            }
            _ => false,
        }
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        match identifier {
            Identifier::TransactionId(id) => self.by_id_or_hash(&id.normalized()).await,
            Identifier::Timestamp(timestamp) => self.at_timestamp(timestamp).await,
            Identifier::ByteSequence(bytes) if self.accepts(identifier) => {
                if bytes.len() == EVM_HASH_LEN {
                    self.by_evm_hash(&bytes.to_prefixed_hex(), cancel).await
                } else {
                    self.by_id_or_hash(&bytes.to_hex()).await
                }
            }
            _ => Ok(None),
        }
    }
}

/// The parent (nonce 0) of a transaction id's family, or the first entry.
fn pick_parent(transactions: Vec<TransactionRecord>) -> Option<TransactionRecord> {
    let parent = transactions
        .iter()
        .position(|t| t.nonce.unwrap_or(0) == 0)
        .unwrap_or(0);
    transactions.into_iter().nth(parent)
}

/// `0.0.2-1627434000-000000000` as `0.0.2@1627434000.000000000`.
fn display_transaction_id(dash_form: &str) -> String {
    let parts: Vec<&str> = dash_form.split('-').collect();
    match parts.as_slice() {
        [payer, seconds, nanos] => format!("{}@{}.{}", payer, seconds, nanos),
        _ => dash_form.to_string(),
    }
}

fn transaction_candidate(record: TransactionRecord) -> Candidate {
    let description = format!(
        "Transaction {}",
        display_transaction_id(&record.transaction_id)
    );
    let when = Timestamp::parse(&record.consensus_timestamp).and_then(|t| t.to_utc_string());
    let extra = match (record.name.as_deref(), when) {
        (Some(name), Some(when)) => Some(format!("{} at {}", name, when)),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(when)) => Some(when),
        (None, None) => None,
    };
    let route = Route::Transaction {
        id: record.transaction_id.clone(),
        timestamp: record.consensus_timestamp.clone(),
    };
    Candidate::new(
        description,
        route,
        Entity::Transaction(record),
        ProbeKind::Transaction,
    )
    .with_extra_opt(extra)
}
