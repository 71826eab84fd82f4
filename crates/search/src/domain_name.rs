//! Human-readable name resolution.
//!
//! Names such as `alice.hbar` are owned by external naming services. The
//! engine only consumes them through [`DomainNameResolver`]; the service
//! itself is provided by the embedding application.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::SearchError;

/// One answer from a naming service.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    /// `shard.realm.num` the name points to.
    pub entity_id: String,
    /// Name of the service that answered, shown to the user.
    pub provider_alias: String,
}

/// External naming service.
///
/// Failures are reported as [`SearchError::DomainResolver`] and counted like
/// any probe failure. An unknown name is an empty list, not an error.
#[async_trait]
pub trait DomainNameResolver: Send + Sync {
    async fn resolve(&self, name: &str, network: &str) -> Result<Vec<DomainRecord>, SearchError>;
}

/// Resolver for deployments without a naming service.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDomainNames;

#[async_trait]
impl DomainNameResolver for NoDomainNames {
    async fn resolve(&self, _name: &str, _network: &str) -> Result<Vec<DomainRecord>, SearchError> {
        Ok(Vec::new())
    }
}

/// Fixed name table, keyed by network and case-insensitive name.
#[derive(Clone, Debug, Default)]
pub struct StaticDomainNames {
    entries: HashMap<(String, String), Vec<DomainRecord>>,
}

impl StaticDomainNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        network: &str,
        name: &str,
        entity_id: impl Into<String>,
        provider_alias: impl Into<String>,
    ) {
        self.entries
            .entry((network.to_string(), name.to_lowercase()))
            .or_default()
            .push(DomainRecord {
                entity_id: entity_id.into(),
                provider_alias: provider_alias.into(),
            });
    }

    pub fn with(
        mut self,
        network: &str,
        name: &str,
        entity_id: impl Into<String>,
        provider_alias: impl Into<String>,
    ) -> Self {
        self.insert(network, name, entity_id, provider_alias);
        self
    }
}

#[async_trait]
impl DomainNameResolver for StaticDomainNames {
    async fn resolve(&self, name: &str, network: &str) -> Result<Vec<DomainRecord>, SearchError> {
        Ok(self
            .entries
            .get(&(network.to_string(), name.to_lowercase()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_names_are_case_insensitive_per_network() {
        let names = StaticDomainNames::new().with("testnet", "Alice.hbar", "0.0.1234", "HNS");

        let records = names.resolve("alice.HBAR", "testnet").await.unwrap();
        assert_eq!(
            records,
            vec![DomainRecord {
                entity_id: "0.0.1234".to_string(),
                provider_alias: "HNS".to_string(),
            }]
        );
        assert!(names.resolve("alice.hbar", "mainnet").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_domain_names() {
        assert!(NoDomainNames.resolve("alice.hbar", "mainnet").await.unwrap().is_empty());
    }
}
