//! Entity probes
//!
//! One [`EntityProbe`] implementation per entity kind. [`ProbeSet`] holds
//! them in priority order for the resolver.

mod account;
mod block;
mod contract;
mod domain;
mod token;
mod topic;
mod traits;
mod transaction;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

pub use account::{AccountAliasProbe, AccountProbe};
pub use block::BlockProbe;
pub use contract::ContractProbe;
pub use domain::DomainNameProbe;
pub use token::TokenProbe;
pub use topic::TopicProbe;
pub use traits::{EntityProbe, ProbeContext};
pub use transaction::TransactionProbe;

use crate::domain_name::DomainNameResolver;
use crate::models::{Identifier, ProbeKind};

/// The probes of one network, sorted by [`ProbeKind`] priority.
#[derive(Clone)]
pub struct ProbeSet {
    probes: Vec<Arc<dyn EntityProbe>>,
}

impl ProbeSet {
    /// Every built-in probe, bound to one mirror node and naming service.
    pub fn standard(ctx: ProbeContext, names: Arc<dyn DomainNameResolver>) -> Self {
        Self::from_probes(vec![
            Arc::new(AccountProbe::new(ctx.clone())),
            Arc::new(ContractProbe::new(ctx.clone())),
            Arc::new(TokenProbe::new(ctx.clone())),
            Arc::new(TransactionProbe::new(ctx.clone())),
            Arc::new(TopicProbe::new(ctx.clone())),
            Arc::new(BlockProbe::new(ctx.clone())),
            Arc::new(AccountAliasProbe::new(ctx.clone())),
            Arc::new(DomainNameProbe::new(ctx, names)),
        ])
    }

    pub fn from_probes(mut probes: Vec<Arc<dyn EntityProbe>>) -> Self {
        probes.sort_by_key(|p| p.kind());
        Self { probes }
    }

    /// Probes whose preconditions the identifier satisfies, in priority order.
    pub fn select(&self, identifier: &Identifier) -> Vec<Arc<dyn EntityProbe>> {
        self.probes
            .iter()
            .filter(|p| p.accepts(identifier))
            .cloned()
            .collect()
    }

    /// Kinds [`select`](Self::select) would pick, without the probes.
    pub fn plan(&self, identifier: &Identifier) -> Vec<ProbeKind> {
        self.select(identifier).iter().map(|p| p.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_name::NoDomainNames;
    use crate::mirror::mock::MockTransport;
    use crate::models::{ByteSequence, EntityId, Timestamp, TransactionId};

    fn standard() -> ProbeSet {
        ProbeSet::standard(mock::context(&MockTransport::new()), Arc::new(NoDomainNames))
    }

    fn bytes(len: usize) -> Identifier {
        Identifier::ByteSequence(ByteSequence::new(vec![0x5a; len]))
    }

    #[test]
    fn test_plan_per_shape() {
        use ProbeKind::*;
        let set = standard();

        let structured = Identifier::StructuredId {
            id: EntityId::new(0, 0, 3),
            checksum: None,
        };
        assert_eq!(set.plan(&structured), vec![Account, Contract, Token, Topic]);

        let tx = Identifier::TransactionId(TransactionId::new(
            EntityId::new(0, 0, 2),
            Timestamp::new(1, 0),
        ));
        assert_eq!(set.plan(&tx), vec![Transaction]);
        assert_eq!(
            set.plan(&Identifier::Timestamp(Timestamp::new(1, 0))),
            vec![Transaction]
        );

        assert_eq!(set.plan(&bytes(48)), vec![Transaction, Block]);
        assert_eq!(set.plan(&bytes(32)), vec![Account, Transaction, Block]);
        assert_eq!(set.plan(&bytes(33)), vec![Account]);
        assert_eq!(set.plan(&bytes(20)), vec![Account, Contract, Token]);
        assert_eq!(
            set.plan(&bytes(7)),
            vec![Account, Contract, Token, AccountAlias]
        );
        assert!(set.plan(&bytes(21)).is_empty());
        assert!(set.plan(&bytes(64)).is_empty());

        assert_eq!(
            set.plan(&Identifier::Base32Alias {
                raw: "CIQ".to_string()
            }),
            vec![Account]
        );
        assert_eq!(
            set.plan(&Identifier::DomainName {
                raw: "a.hbar".to_string()
            }),
            vec![DomainName]
        );
        assert_eq!(set.plan(&Identifier::BlockNumber(9)), vec![Block]);
    }

    #[test]
    fn test_probes_sorted_by_priority() {
        let ctx = mock::context(&MockTransport::new());
        let set = ProbeSet::from_probes(vec![
            Arc::new(TopicProbe::new(ctx.clone())),
            Arc::new(AccountProbe::new(ctx)),
        ]);
        let structured = Identifier::StructuredId {
            id: EntityId::new(0, 0, 3),
            checksum: None,
        };
        assert_eq!(
            set.plan(&structured),
            vec![ProbeKind::Account, ProbeKind::Topic]
        );
        assert_eq!(set.len(), 2);
    }
}
