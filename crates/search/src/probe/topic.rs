use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{EntityProbe, ProbeContext};
use crate::errors::{NotFoundExt, SearchError};
use crate::models::{Candidate, Entity, Identifier, ProbeKind, Route};

/// Proves a topic exists by fetching its most recent message.
pub struct TopicProbe {
    ctx: ProbeContext,
}

impl TopicProbe {
    pub fn new(ctx: ProbeContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EntityProbe for TopicProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Topic
    }

    fn accepts(&self, identifier: &Identifier) -> bool {
        matches!(identifier, Identifier::StructuredId { .. })
    }

    async fn attempt(
        &self,
        identifier: &Identifier,
        _cancel: &CancellationToken,
    ) -> Result<Option<Candidate>, SearchError> {
        let Identifier::StructuredId { id, .. } = identifier else {
            return Ok(None);
        };
        let topic_id = id.to_string();
        let message = self
            .ctx
            .mirror
            .latest_topic_message(&topic_id)
            .await
            .found()?
            .flatten();

        Ok(message.map(|m| {
            let extra = format!("{} messages", m.sequence_number);
            Candidate::new(
                format!("Topic {}", self.ctx.display_id(&topic_id)),
                Route::Topic { id: topic_id },
                Entity::Topic(m),
                ProbeKind::Topic,
            )
            .with_extra(extra)
        }))
    }
}
