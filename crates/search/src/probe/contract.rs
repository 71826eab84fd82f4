use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::models::{Candidate, Entity, Identifier, ProbeKind, Route};

/// Looks up smart contracts by structured id or EVM address.
pub struct ContractProbe {
    ctx: ProbeContext,
}

impl ContractProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    fn lookup_key(identifier: &Identifier) -> Option<String> {
        match identifier {
            Identifier::StructuredId { id, .. } => Some(id.to_string()),
            Identifier::ByteSequence(bytes) => bytes.evm_address().map(|a| a.to_string()),
            _ => None,
        }
    }
}

#[async_trait]
impl EntityProbe for ContractProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Contract
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        Self::lookup_key(identifier).is_some()
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        _cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Some(key) = Self::lookup_key(identifier) else {
            return Ok(None);
        };
        let Some(record) = self.ctx.mirror.contract(&key).await.found()? else {
            return Ok(None);
        };

        let description = format!("Contract {}", self.ctx.display_id(&record.contract_id));
        let extra = match (record.deleted.unwrap_or(false), record.memo.as_deref()) {
            (true, _) => Some("Deleted".to_string()),
            (false, Some(memo)) if !memo.is_empty() => Some(memo.to_string()),
            _ => None,
        };
        let route = Route::Contract {
            id: record.contract_id.clone(),
        };
        Ok(Some(
            Candidate::new(description, route, Entity::Contract(record), ProbeKind::Contract)
                .with_extra_opt(extra),
        ))
    }
}
