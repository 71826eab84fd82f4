//! Typed mirror node queries used by the probes.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use urlencoding::encode;

use super::models::{
    AccountRecord, AccountsPage, BlockRecord, ContractRecord, ContractResultRecord, TokenRecord,
    TopicMessageRecord, TopicMessagesPage, TransactionRecord, TransactionsPage,
};
use super::transport::MirrorTransport;
use crate::errors::SearchError;
use crate::models::Timestamp;

/// Typed view of the mirror node endpoints.
///
/// Every method issues exactly one GET. "Not found" surfaces as
/// [`SearchError::NotFound`]; callers decide whether that is an error.
#[derive(Clone)]
pub struct MirrorNode {
    transport: Arc<dyn MirrorTransport>,
}

impl MirrorNode {
    pub fn new(transport: Arc<dyn MirrorTransport>) -> Self {
        Self { transport }
    }

    async fn get<T: DeserializeOwned>(&self, path: String) -> Result<T, SearchError> {
        let value: Value = self.transport.get(&path).await?;
        serde_json::from_value(value).map_err(|e| SearchError::MalformedResponse {
            path,
            message: e.to_string(),
        })
    }

    /// `GET /accounts/{idOrAliasOrEvmAddress}`
    pub async fn account(&self, id_or_alias: &str) -> Result<AccountRecord, SearchError> {
        self.get(format!("/accounts/{}", encode(id_or_alias))).await
    }

    /// `GET /accounts?account.publickey={hex}&limit={limit}`
    pub async fn accounts_by_public_key(
        &self,
        key_hex: &str,
        limit: u32,
    ) -> Result<Vec<AccountRecord>, SearchError> {
        let page: AccountsPage = self
            .get(format!(
                "/accounts?account.publickey={}&limit={}",
                encode(key_hex),
                limit
            ))
            .await?;
        Ok(page.accounts)
    }

    /// `GET /contracts/{idOrEvmAddress}`
    pub async fn contract(&self, id_or_address: &str) -> Result<ContractRecord, SearchError> {
        self.get(format!("/contracts/{}", encode(id_or_address))).await
    }

    /// `GET /contracts/results/{evmHash}`
    pub async fn contract_result(
        &self,
        evm_hash: &str,
    ) -> Result<ContractResultRecord, SearchError> {
        self.get(format!("/contracts/results/{}", encode(evm_hash))).await
    }

    /// `GET /tokens/{id}`
    pub async fn token(&self, id: &str) -> Result<TokenRecord, SearchError> {
        self.get(format!("/tokens/{}", encode(id))).await
    }

    /// `GET /topics/{id}/messages?order=desc&limit=1`
    ///
    /// `Ok(None)` for a topic that exists but has no messages yet.
    pub async fn latest_topic_message(
        &self,
        topic_id: &str,
    ) -> Result<Option<TopicMessageRecord>, SearchError> {
        let page: TopicMessagesPage = self
            .get(format!("/topics/{}/messages?order=desc&limit=1", encode(topic_id)))
            .await?;
        Ok(page.messages.into_iter().next())
    }

    /// `GET /transactions/{transactionIdOrHash}`
    pub async fn transactions(
        &self,
        id_or_hash: &str,
    ) -> Result<Vec<TransactionRecord>, SearchError> {
        let page: TransactionsPage = self
            .get(format!("/transactions/{}", encode(id_or_hash)))
            .await?;
        Ok(page.transactions)
    }

    /// `GET /transactions?timestamp={t}`
    pub async fn transactions_at(
        &self,
        timestamp: &Timestamp,
    ) -> Result<Vec<TransactionRecord>, SearchError> {
        let page: TransactionsPage = self
            .get(format!("/transactions?timestamp={}", timestamp))
            .await?;
        Ok(page.transactions)
    }

    /// `GET /blocks/{hashOrNumber}`
    pub async fn block(&self, hash_or_number: &str) -> Result<BlockRecord, SearchError> {
        self.get(format!("/blocks/{}", encode(hash_or_number))).await
    }
}
