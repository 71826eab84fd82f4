use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::models::{Candidate, Entity, EntityId, Identifier, ProbeKind, Route};

/// Looks up tokens by structured id.
///
/// The token endpoint only takes ids, so an EVM address is converted to its
/// long-zero id first. Addresses that are not long-zero are accepted but
/// settle as absent without a request.
pub struct TokenProbe {
    ctx: ProbeContext,
}

impl TokenProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    fn token_id(identifier: &Identifier) -> Option<EntityId> {
        match identifier {
            Identifier::StructuredId { id, .. } => Some(*id),
            Identifier::ByteSequence(bytes) => bytes
                .evm_address()
                .and_then(|address| EntityId::from_evm_address(&address)),
            _ => None,
        }
    }
}

#[async_trait]
impl EntityProbe for TokenProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Token
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::StructuredId { .. } => true,
            Identifier::ByteSequence(bytes) => bytes.evm_address().is_some(),
            _ => false,
        }
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        _cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Some(id) = Self::token_id(identifier) else {
            return Ok(None);
        };
        let Some(record) = self.ctx.mirror.token(&id.to_string()).await.found()? else {
            return Ok(None);
        };

        let description = format!("Token {}", self.ctx.display_id(&record.token_id));
        let extra = match (record.name.as_deref(), record.symbol.as_deref()) {
            (Some(name), Some(symbol)) => Some(format!("{} ({})", name, symbol)),
            (Some(name), None) => Some(name.to_string()),
            (None, Some(symbol)) => Some(symbol.to_string()),
            (None, None) => None,
        };
        let route = Route::Token {
            id: record.token_id.clone(),
        };
        Ok(Some(
            Candidate::new(description, route, Entity::Token(record), ProbeKind::Token)
                .with_extra_opt(extra),
        ))
    }
}
