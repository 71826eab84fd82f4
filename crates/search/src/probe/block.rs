use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::models::{
    Candidate, Entity, Identifier, ProbeKind, Route, Timestamp, EVM_HASH_LEN, NATIVE_HASH_LEN,
};

/// Looks up record-file blocks by hash (48 or 32 bytes) or by `#height`.
pub struct BlockProbe {
    ctx: ProbeContext,
}

impl BlockProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }

    fn lookup_key(identifier: &Identifier) -> Option<String> {
        match identifier {
            Identifier::BlockNumber(number) => Some(number.to_string()),
            Identifier::ByteSequence(bytes)
                if bytes.len() == NATIVE_HASH_LEN || bytes.len() == EVM_HASH_LEN =>
            {
                Some(bytes.to_prefixed_hex())
            }
            _ => None,
        }
    }
}

#[async_trait]
impl EntityProbe for BlockProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Block
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
        let Some(record) = self.ctx.mirror.block(&key).await.found()? else {
            return Ok(None);
        };

        let when = record
            .timestamp
            .as_ref()
            .and_then(|t| Timestamp::parse(&t.from))
            .and_then(|t| t.to_utc_string());
        let extra = match (record.count, when) {
            (Some(count), Some(when)) => Some(format!("{} transactions at {}", count, when)),
            (Some(count), None) => Some(format!("{} transactions", count)),
            (None, when) => when,
        };
        let route = Route::Block {
            number: record.number,
        };
        Ok(Some(
            Candidate::new(
                format!("Block {}", record.number),
                route,
                Entity::Block(record),
                ProbeKind::Block,
            )
            .with_extra_opt(extra),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::mock::MockTransport;
    use crate::models::ByteSequence;
    use crate::probe::mock::context;
    use serde_json::json;

    #[tokio::test]
    async fn test_block_by_number() {
        let transport = MockTransport::new().with(
            "/blocks/1234",
            json!({
                "number": 1234,
                "hash": "0x".to_string() + &"ef".repeat(48),
                "count": 7,
                "timestamp": { "from": "1627434000.000000000", "to": "1627434001.999999999" }
            }),
        );
        let probe = BlockProbe::new(context(&transport));

        let candidate = probe
            .attempt(&Identifier::BlockNumber(1234), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(candidate.description, "Block 1234");
        assert_eq!(candidate.target_route, Route::Block { number: 1234 });
        assert_eq!(
            candidate.extra.as_deref(),
            Some("7 transactions at 2021-07-28 01:00:00.000000000 UTC")
        );
    }

    #[tokio::test]
    async fn test_block_hash_not_found() {
        let transport = MockTransport::new();
        let probe = BlockProbe::new(context(&transport));
        let identifier = Identifier::ByteSequence(ByteSequence::new(vec![0xef; 48]));

        assert!(probe
            .attempt(&identifier, &CancellationToken::new())
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            transport.calls(),
            vec![format!("/blocks/0x{}", "ef".repeat(48))]
        );
    }

    #[tokio::test]
    async fn test_other_shapes_rejected_without_request() {
        let transport = MockTransport::new();
        let probe = BlockProbe::new(context(&transport));
        let identifier = Identifier::ByteSequence(ByteSequence::new(vec![1; 20]));

        assert!(!probe.accepts(&identifier));
        assert!(probe
            .attempt(&identifier, &CancellationToken::new())
            .await
            .unwrap()
            .is_none());
        assert!(transport.calls().is_empty());
    }
}
