use std::fmt;

use serde::{Deserialize, Serialize};

const EVM_ADDRESS_LEN: usize = 20;

/// Canonical `shard.realm.num` identity of a ledger entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl EntityId {
    pub fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// Id behind a long-zero EVM address (first twelve bytes zero, num in
    /// the last eight, big-endian).
    ///
    /// Only long-zero addresses (first twelve bytes zero) map back to an id;
    /// any other address is key-derived and has no structural id.
    pub fn from_evm_address(address: &EvmAddress) -> Option<Self> {
        if !address.is_long_zero() {
            return None;
        }
        let mut num = [0u8; 8];
        num.copy_from_slice(&address.0[12..]);
        Some(Self::new(0, 0, u64::from_be_bytes(num)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

/// A 20-byte EVM address.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EvmAddress(pub [u8; EVM_ADDRESS_LEN]);

impl EvmAddress {
    /// Builds an address from exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; EVM_ADDRESS_LEN] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Left-pads up to 20 bytes with zeros. Longer inputs are rejected.
    pub fn from_partial(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > EVM_ADDRESS_LEN {
            return None;
        }
        let mut array = [0u8; EVM_ADDRESS_LEN];
        array[EVM_ADDRESS_LEN - bytes.len()..].copy_from_slice(bytes);
        Some(Self(array))
    }

    pub fn is_long_zero(&self) -> bool {
        self.0[..12].iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
