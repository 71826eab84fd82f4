use serde::Serialize;

use crate::mirror::models::{
    AccountRecord, BlockRecord, ContractRecord, TokenRecord, TopicMessageRecord,
    TransactionRecord,
};

/// Which probe produced a candidate.
///
/// The declaration order is the merge priority: entity probes, then
/// container probes (topics, blocks), then the fallback alias probes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbeKind {
    Account,
    Contract,
    Token,
    Transaction,
    Topic,
    Block,
    /// Account lookup of short raw bytes as an alias.
    AccountAlias,
    DomainName,
}

impl ProbeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::Contract => "CONTRACT",
            Self::Token => "TOKEN",
            Self::Transaction => "TRANSACTION",
            Self::Topic => "TOPIC",
            Self::Block => "BLOCK",
            Self::AccountAlias => "ACCOUNT_ALIAS",
            Self::DomainName => "DOMAIN_NAME",
        }
    }
}

/// Where the presentation layer navigates when a candidate is chosen.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Route {
    Account { id: String },
    Contract { id: String },
    Token { id: String },
    Topic { id: String },
    Transaction { id: String, timestamp: String },
    Block { number: u64 },
}

impl Route {
    /// Explorer-style path, e.g. `/mainnet/account/0.0.3`.
    pub fn path(&self, network: &str) -> String {
        match self {
            Self::Account { id } => format!("/{}/account/{}", network, id),
            Self::Contract { id } => format!("/{}/contract/{}", network, id),
            Self::Token { id } => format!("/{}/token/{}", network, id),
            Self::Topic { id } => format!("/{}/topic/{}", network, id),
            Self::Transaction { id, timestamp } => {
                format!("/{}/transaction/{}?tid={}", network, timestamp, id)
            }
            Self::Block { number } => format!("/{}/block/{}", network, number),
        }
    }
}

/// The ledger record a candidate was built from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "camelCase")]
pub enum Entity {
    Account(AccountRecord),
    Contract(ContractRecord),
    Token(TokenRecord),
    /// The latest message, proving the topic exists.
    Topic(TopicMessageRecord),
    Transaction(TransactionRecord),
    Block(BlockRecord),
    /// An account named by an external alias that the ledger does not know.
    UnconfirmedAccount { account: String },
}

/// One confirmed, displayable resolution of the input.
///
/// Built by a probe and never modified afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub description: String,
    pub extra: Option<String>,
    pub target_route: Route,
    pub entity: Entity,
    pub source_probe: ProbeKind,
    pub non_existent: bool,
}

impl Candidate {
    pub fn new(
        description: impl Into<String>,
        target_route: Route,
        entity: Entity,
        source_probe: ProbeKind,
    ) -> Self {
        Self {
            description: description.into(),
            extra: None,
            target_route,
            entity,
            source_probe,
            non_existent: false,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    pub fn with_extra_opt(mut self, extra: Option<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn non_existent(mut self) -> Self {
        self.non_existent = true;
        self
    }
}
