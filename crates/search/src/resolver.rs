//! Speculative resolution of a classified identifier.
//!
//! The resolver fans an identifier out to every probe that accepts its
//! shape, waits for all of them to settle and merges their candidates:
//! - probes run concurrently; a slow or failing probe never blocks the others
//! - "not found" is a normal settlement, any other failure counts once
//! - candidates are ordered by [`ProbeKind`] priority, not completion order
//! - two candidates with the same route keep the higher-priority one

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::checksum;
use crate::domain_name::DomainNameResolver;
use crate::errors::OutcomeClass;
use crate::mirror::MirrorNode;
use crate::models::{
    Candidate, Identifier, LedgerId, NetworkConfig, ProbeKind, ResolutionOutcome, EVM_ADDRESS_LEN,
};
use crate::probe::{ProbeContext, ProbeSet};

/// Runs the probe set for one identifier and merges the results.
#[derive(Clone)]
pub struct SpeculativeResolver {
    ledger_id: LedgerId,
    probes: ProbeSet,
}

impl SpeculativeResolver {
    pub fn new(ledger_id: LedgerId, probes: ProbeSet) -> Self {
        Self { ledger_id, probes }
    }

    /// Resolver with the standard probes for `network`.
    pub fn for_network(
        mirror: MirrorNode,
        network: NetworkConfig,
        names: Arc<dyn DomainNameResolver>,
    ) -> Self {
        let ledger_id = network.ledger_id.clone();
        let probes = ProbeSet::standard(ProbeContext::new(mirror, network), names);
        Self::new(ledger_id, probes)
    }

    pub fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    /// Resolves to completion.
    pub async fn resolve(&self, identifier: &Identifier) -> ResolutionOutcome {
        self.resolve_cancellable(identifier, &CancellationToken::new())
            .await
            .unwrap_or_default()
    }

    /// Resolves unless `cancel` fires first.
    ///
    /// Returns `None` once cancelled, however far the probes got. In-flight
    /// probe futures are dropped, which aborts their requests.
    pub async fn resolve_cancellable(
        &self,
        identifier: &Identifier,
        cancel: &CancellationToken,
    ) -> Option<ResolutionOutcome> {
        if let Identifier::StructuredId {
            id,
            checksum: Some(sum),
        } = identifier
        {
            if !checksum::validate(&id.to_string(), sum, &self.ledger_id) {
                debug!("Checksum {} rejected for {}, skipping probes", sum, id);
                return Some(ResolutionOutcome::empty());
            }
        }

        let evm_address = match identifier {
            Identifier::ByteSequence(bytes) if bytes.len() == EVM_ADDRESS_LEN => {
                Some(bytes.to_prefixed_hex())
            }
            _ => None,
        };

        let probes = self.probes.select(identifier);
        debug!(
            "Resolving {:?} with {} probes: {:?}",
            identifier.kind(),
            probes.len(),
            probes.iter().map(|p| p.kind()).collect::<Vec<_>>()
        );

        let attempts = probes.iter().map(|probe| async move {
            let kind = probe.kind();
            let settled = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                result = probe.attempt(identifier, cancel) => Some(result),
            };
            (kind, settled)
        });
        let settled = join_all(attempts).await;

        if cancel.is_cancelled() {
            debug!("Resolution of {:?} cancelled, discarding", identifier.kind());
            return None;
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut routes = HashSet::new();
        let mut error_count = 0u32;

        for (kind, result) in settled {
            match result {
                Some(Ok(Some(candidate))) => {
                    debug!("Probe {} found {}", kind.as_str(), candidate.description);
                    if routes.insert(candidate.target_route.clone()) {
                        candidates.push(candidate);
                    } else {
                        debug!(
                            "Probe {} duplicates a higher-priority candidate, dropped",
                            kind.as_str()
                        );
                    }
                }
                Some(Ok(None)) => {
                    debug!("Probe {} found nothing", kind.as_str());
                }
                Some(Err(e)) => match e.outcome_class() {
                    OutcomeClass::Failure => {
                        warn!("Probe {} failed: {}", kind.as_str(), e);
                        error_count += 1;
                    }
                    OutcomeClass::Absent | OutcomeClass::Rejected => {
                        debug!("Probe {} settled without a match: {}", kind.as_str(), e);
                    }
                },
                None => {}
            }
        }

        let outcome = ResolutionOutcome {
            candidates,
            error_count,
            evm_address,
        };
        info!(
            "Resolved {:?}: {} candidates, {} errors",
            identifier.kind(),
            outcome.candidates.len(),
            outcome.error_count
        );
        Some(outcome)
    }

    /// Kinds that would run for `identifier`, in merge order.
    pub fn plan(&self, identifier: &Identifier) -> Vec<ProbeKind> {
        self.probes.plan(identifier)
    }
}
