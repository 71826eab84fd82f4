use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio_util::sync::CancellationToken;

use super::account::account_candidate;
use super::{EntityProbe, ProbeContext};
use crate::domain_name::DomainNameResolver;
use crate::errors::{NotFoundExt, SearchError};
use crate::models::{Candidate, Entity, Identifier, ProbeKind, Route};

/// Resolves a human-readable name through the external naming service and
/// confirms the account it points to.
pub struct DomainNameProbe {
    ctx: ProbeContext,
    names: Arc<dyn DomainNameResolver>,
}

impl DomainNameProbe {
    pub fn new(ctx: ProbeContext, names: Arc<dyn DomainNameResolver>) -> Self {
        Self { ctx, names }
    }
}

#[async_trait]
impl EntityProbe for DomainNameProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::DomainName
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        matches!(identifier, Identifier::DomainName { .. })
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Identifier::DomainName { raw } = identifier else {
            return Ok(None);
        };

        let records = self.names.resolve(raw, &self.ctx.network.name).await?;
        let Some(record) = records.into_iter().next() else {
            return Ok(None);
        };
        debug!(
            "{} resolved {} to {}",
            record.provider_alias, raw, record.entity_id
        );
        if cancel.is_cancelled() {
            return Ok(None);
        }

        let provider = format!("{} via {}", raw, record.provider_alias);
        let account = self.ctx.mirror.account(&record.entity_id).await.found()?;
        let candidate = match account {
            Some(account) => account_candidate(&self.ctx, account, ProbeKind::DomainName)
                .with_extra(provider),
            None => Candidate::new(
                format!("Account {}", self.ctx.display_id(&record.entity_id)),
                Route::Account {
                    id: record.entity_id.clone(),
                },
                Entity::UnconfirmedAccount {
                    account: record.entity_id.clone(),
                },
                ProbeKind::DomainName,
            )
            .with_extra(format!(
                "{} (account not found on {})",
                provider, self.ctx.network.name
            ))
            .non_existent(),
        };
        Ok(Some(candidate))
    }
}
