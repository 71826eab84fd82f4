//! Probe trait definitions.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::checksum;
use crate::errors::SearchError;
use crate::mirror::MirrorNode;
use crate::models::{Candidate, EntityId, Identifier, NetworkConfig, ProbeKind};

/// Speculative existence check for one entity kind.
///
/// The resolver asks every probe whether it [`accepts`](Self::accepts) the
/// classified identifier and runs the accepting ones concurrently.
///
/// `attempt` returns:
/// - `Ok(Some(candidate))` - the interpretation exists
/// - `Ok(None)` - the interpretation does not exist (never an error)
/// - `Err(e)` - the lookup failed; the resolver counts it once
#[async_trait]
pub trait EntityProbe: Send + Sync {
    /// Stable kind, also the merge priority of the candidates.
    fn kind(&self) -> ProbeKind;

    /// Whether the identifier's shape satisfies this probe's preconditions.
    ///
    /// Must be cheap and must not touch the network.
    fn accepts(&self, identifier: &Identifier) -> bool;

    /// Confirms or denies the interpretation.
    ///
    /// Multi-step probes check `cancel` between their requests; the resolver
    /// also drops the whole future when the token fires.
    async fn attempt(
        &self,
        identifier: &Identifier,
        cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError>;
}

/// What every probe needs: the query surface and the network it belongs to.
#[derive(Clone)]
pub struct ProbeContext {
    pub mirror: MirrorNode,
    pub network: NetworkConfig,
}

impl ProbeContext {
    pub fn new(mirror: MirrorNode, network: NetworkConfig) -> Self {
        Self { mirror, network }
    }

    /// `0.0.3-tzfmz` for a parseable id, the raw text otherwise.
    pub fn display_id(&self, id: &str) -> String {
        match parse_entity_id(id) {
            Some(entity) => checksum::format_with_checksum(&entity, &self.network.ledger_id),
            None => id.to_string(),
        }
    }
}

pub(crate) fn parse_entity_id(text: &str) -> Option<EntityId> {
    let mut parts = text.split('.');
    let shard = parts.next()?.parse().ok()?;
    let realm = parts.next()?.parse().ok()?;
    let num = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(EntityId::new(shard, realm, num))
}
