//! Account probes.
//!
//! [`AccountProbe`] resolves structured ids, base32 aliases, EVM addresses
//! (full or zero-padded) and public keys. [`AccountAliasProbe`] is the
//! fallback reading of short byte sequences as raw alias bytes.

use async_trait::async_trait;
use data_encoding::BASE32_NOPAD;
use log::debug;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::mirror::models::AccountRecord;
use crate::models::{Candidate, Entity, Identifier, ProbeKind, Route};

/// Cap on the public key listing. Two is enough to tell a unique key from a
/// shared one.
const PUBLIC_KEY_LIMIT: u32 = 2;

pub struct AccountProbe {
    ctx: ProbeContext,
}

impl AccountProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    /// The path segment for a single-account lookup.
    fn lookup_key(identifier: &Identifier) -> Option<String> {
        match identifier {
            Identifier::StructuredId { id, .. } => Some(id.to_string()),
            Identifier::Base32Alias { raw } => Some(raw.clone()),
            Identifier::ByteSequence(bytes) => bytes.evm_address().map(|a| a.to_string()),
            _ => None,
        }
    }

    async fn by_public_key(&self, key_hex: &str) -> Result<Option<Candidate>, SearchError> {
        let accounts = self
            .ctx
            .mirror
            .accounts_by_public_key(key_hex, PUBLIC_KEY_LIMIT)
            .await
            .found()?
            .unwrap_or_default();

        let shared = accounts.len() > 1;
        let Some(first) = accounts.into_iter().next() else {
            return Ok(None);
        };
        if shared {
            debug!("Public key {} is shared by several accounts", key_hex);
        }

        let candidate = account_candidate(&self.ctx, first, ProbeKind::Account);
        Ok(Some(if shared {
            candidate.with_extra("Public key shared by several accounts")
        } else {
            candidate
        }))
    }
}

#[async_trait]
impl EntityProbe for AccountProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Account
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::ByteSequence(bytes) => bytes.is_public_key() || bytes.evm_address().is_some(),
            other => Self::lookup_key(other).is_some(),
        }
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        _cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        if let Identifier::ByteSequence(bytes) = identifier {
            if bytes.is_public_key() {
                return self.by_public_key(&bytes.to_hex()).await;
            }
        }

        let Some(key) = Self::lookup_key(identifier) else {
            return Ok(None);
        };
        let record = self.ctx.mirror.account(&key).await.found()?;
        Ok(record.map(|r| account_candidate(&self.ctx, r, ProbeKind::Account)))
    }
}

/// Reads a short byte sequence as raw alias bytes.
pub struct AccountAliasProbe {
    ctx: ProbeContext,
}

impl AccountAliasProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EntityProbe for AccountAliasProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::AccountAlias
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        matches!(identifier, Identifier::ByteSequence(bytes) if bytes.is_partial_address())
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        _cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Identifier::ByteSequence(bytes) = identifier else {
            return Ok(None);
        };
        let alias = BASE32_NOPAD.encode(bytes.as_bytes());
        let record = self.ctx.mirror.account(&alias).await.found()?;
        Ok(record.map(|r| {
            account_candidate(&self.ctx, r, ProbeKind::AccountAlias)
                .with_extra(format!("Matched alias {}", alias))
        }))
    }
}

pub(crate) fn account_candidate(
    ctx: &ProbeContext,
    record: AccountRecord,
    source: ProbeKind,
) -> Candidate {
    let description = format!("Account {}", ctx.display_id(&record.account));
    let extra = if record.deleted.unwrap_or(false) {
        Some("Deleted".to_string())
    } else {
        None
    };
    let route = Route::Account {
        id: record.account.clone(),
    };
    Candidate::new(description, route, Entity::Account(record), source).with_extra_opt(extra)
}
