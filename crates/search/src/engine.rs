//! Classification and resolution behind one call.

use std::sync::Arc;

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::classifier::IdentifierClassifier;
use crate::domain_name::DomainNameResolver;
use crate::errors::SearchError;
use crate::mirror::{HttpTransport, MirrorNode, MirrorSettings, MirrorTransport};
use crate::models::{NetworkConfig, ResolutionOutcome};
use crate::resolver::SpeculativeResolver;

/// Search entry point for one network.
#[derive(Clone)]
pub struct SearchEngine {
    network: NetworkConfig,
    classifier: IdentifierClassifier,
    resolver: SpeculativeResolver,
}

impl SearchEngine {
    pub fn new(
        network: NetworkConfig,
        classifier: IdentifierClassifier,
        resolver: SpeculativeResolver,
    ) -> Self {
        Self {
            network,
            classifier,
            resolver,
        }
    }

    /// Engine over any transport, with the standard probes.
    pub fn with_transport(
        network: NetworkConfig,
        transport: Arc<dyn MirrorTransport>,
        names: Arc<dyn DomainNameResolver>,
    ) -> Self {
        let classifier = IdentifierClassifier::for_network(&network);
        let resolver =
            SpeculativeResolver::for_network(MirrorNode::new(transport), network.clone(), names);
        Self::new(network, classifier, resolver)
    }

    /// Engine talking HTTP to the network's mirror node.
    pub fn connect(
        network: NetworkConfig,
        settings: &MirrorSettings,
        names: Arc<dyn DomainNameResolver>,
    ) -> Result<Self, SearchError> {
        let transport = HttpTransport::new(&network.mirror_base_url, settings)?;
        Ok(Self::with_transport(network, Arc::new(transport), names))
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn classifier(&self) -> &IdentifierClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &SpeculativeResolver {
        &self.resolver
    }

    /// Classifies and resolves `raw`.
    ///
    /// Rejected input (no matching shape, wrong checksum) yields an empty
    /// outcome with no errors counted.
    pub async fn search(&self, raw: &str) -> ResolutionOutcome {
        self.search_cancellable(raw, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// [`search`](Self::search) that returns `None` once `cancel` fires.
    pub async fn search_cancellable(
        &self,
        raw: &str,
        cancel: &CancellationToken,
    ) -> Option<ResolutionOutcome> {
        match self.classifier.classify(raw) {
            Ok(identifier) => self.resolver.resolve_cancellable(&identifier, cancel).await,
            Err(e) => {
                debug!("Input rejected: {}", e);
                Some(ResolutionOutcome::empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_name::NoDomainNames;
    use crate::mirror::mock::MockTransport;
    use crate::models::OutcomeStatus;
    use crate::probe::mock::account;

    fn engine(transport: &MockTransport) -> SearchEngine {
        SearchEngine::with_transport(
            NetworkConfig::mainnet(),
            Arc::new(transport.clone()),
            Arc::new(NoDomainNames),
        )
    }

    #[tokio::test]
    async fn test_search_account() {
        let transport = MockTransport::new().with("/accounts/0.0.3", account("0.0.3"));
        let outcome = engine(&transport).search(" 0.0.3-tzfmz ").await;

        assert_eq!(outcome.status(), OutcomeStatus::Results);
        assert_eq!(outcome.candidates[0].description, "Account 0.0.3-tzfmz");
    }

    #[test]
    fn test_engine_exposes_network_and_probes() {
        let engine = engine(&MockTransport::new());
        assert_eq!(engine.network().name, "mainnet");
        assert_eq!(engine.resolver().probes().len(), 8);
    }

    #[tokio::test]
    async fn test_rejections_are_empty_without_requests() {
        let transport = MockTransport::new();
        let engine = engine(&transport);

        for raw in ["", "   ", "0.0.3-aaaaa", "not an id", "0xabc"] {
            let outcome = engine.search(raw).await;
            assert_eq!(outcome, ResolutionOutcome::empty(), "input {:?}", raw);
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let transport = MockTransport::new().with("/accounts/0.0.3", account("0.0.3"));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(
            engine(&transport).search_cancellable("0.0.3", &cancel).await,
            None
        );
    }
}
