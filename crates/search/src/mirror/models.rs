//! Mirror node REST response shapes.
//!
//! Only the fields the probes and candidates use are mapped; the mirror node
//! returns many more.

use serde::{Deserialize, Serialize};

// ============================================================================
// Accounts
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// `shard.realm.num`
    pub account: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub evm_address: Option<String>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub balance: Option<AccountBalance>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Tinybars
    pub balance: i64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountsPage {
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
}

// ============================================================================
// Contracts
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub contract_id: String,
    #[serde(default)]
    pub evm_address: Option<String>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// `/contracts/results/{hash}`
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ContractResultRecord {
    /// Consensus timestamp of the transaction that produced the result.
    pub timestamp: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub contract_id: Option<String>,
}

// ============================================================================
// Tokens
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    /// `FUNGIBLE_COMMON` or `NON_FUNGIBLE_UNIQUE`
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    #[serde(default)]
    pub deleted: Option<bool>,
}

// ============================================================================
// Topics
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TopicMessageRecord {
    pub topic_id: String,
    pub sequence_number: u64,
    pub consensus_timestamp: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicMessagesPage {
    #[serde(default)]
    pub messages: Vec<TopicMessageRecord>,
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Dash form, e.g. `0.0.2-1627434000-000000000`
    pub transaction_id: String,
    pub consensus_timestamp: String,
    /// Transaction type, e.g. `CRYPTOTRANSFER`
    #[serde(default)]
    pub name: Option<String>,
    /// Receipt status, e.g. `SUCCESS`
    #[serde(default)]
    pub result: Option<String>,
    /// Zero for the parent transaction, >0 for child transactions.
    #[serde(default)]
    pub nonce: Option<u32>,
    #[serde(default)]
    pub entity_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

// ============================================================================
// Blocks
// ============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub number: u64,
    pub hash: String,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<BlockTimestamps>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockTimestamps {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_ignores_unknown_fields() {
        let record: AccountRecord = serde_json::from_value(json!({
            "account": "0.0.3",
            "auto_renew_period": 7776000,
            "balance": { "balance": 100, "timestamp": "1.2", "tokens": [] },
            "deleted": false,
        }))
        .unwrap();
        assert_eq!(record.account, "0.0.3");
        assert_eq!(record.balance.unwrap().balance, 100);
        assert_eq!(record.alias, None);
    }

    #[test]
    fn test_token_type_rename() {
        let record: TokenRecord = serde_json::from_value(json!({
            "token_id": "0.0.1001",
            "name": "Sample",
            "symbol": "SMP",
            "type": "FUNGIBLE_COMMON",
        }))
        .unwrap();
        assert_eq!(record.token_type.as_deref(), Some("FUNGIBLE_COMMON"));
    }

    #[test]
    fn test_empty_pages_default() {
        let page: TransactionsPage = serde_json::from_value(json!({ "links": {} })).unwrap();
        assert!(page.transactions.is_empty());
    }
}
