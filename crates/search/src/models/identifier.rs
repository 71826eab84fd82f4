use serde::Serialize;

use super::{EntityId, EvmAddress, Timestamp, TransactionId};

/// Byte lengths with a dedicated interpretation.
pub(crate) const NATIVE_HASH_LEN: usize = 48;
pub(crate) const EVM_HASH_LEN: usize = 32;
pub(crate) const COMPRESSED_KEY_LEN: usize = 33;
pub(crate) const EVM_ADDRESS_LEN: usize = 20;

/// The classified shape of a raw search input.
///
/// Exactly one variant is produced per successful classification. The
/// variant decides which probes the resolver runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Identifier {
    /// `shard.realm.num`, with the checksum already validated.
    StructuredId {
        id: EntityId,
        checksum: Option<String>,
    },

    /// `shard.realm.num@seconds.nanos` or the dash form.
    TransactionId(TransactionId),

    /// `seconds.nanos` consensus timestamp.
    Timestamp(Timestamp),

    /// Raw hex-decoded bytes.
    ByteSequence(ByteSequence),

    /// Account alias in the base32 alias alphabet.
    Base32Alias { raw: String },

    /// Human-readable name such as `alice.hbar`.
    DomainName { raw: String },

    /// `#1234` block height.
    BlockNumber(u64),
}

/// Discriminant of [`Identifier`], for logging and plans.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierKind {
    StructuredId,
    TransactionId,
    Timestamp,
    ByteSequence,
    Base32Alias,
    DomainName,
    BlockNumber,
}

impl Identifier {
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::StructuredId { .. } => IdentifierKind::StructuredId,
            Self::TransactionId(_) => IdentifierKind::TransactionId,
            Self::Timestamp(_) => IdentifierKind::Timestamp,
            Self::ByteSequence(_) => IdentifierKind::ByteSequence,
            Self::Base32Alias { .. } => IdentifierKind::Base32Alias,
            Self::DomainName { .. } => IdentifierKind::DomainName,
            Self::BlockNumber(_) => IdentifierKind::BlockNumber,
        }
    }
}

/// Hex-decoded input bytes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ByteSequence {
    bytes: Vec<u8>,
}

impl ByteSequence {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// `0x`-prefixed lowercase hex, the form EVM hashes travel in.
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// EVM address for exactly 20 bytes, or the zero-padded partial
    /// address for shorter sequences.
    pub fn evm_address(&self) -> Option<EvmAddress> {
        match self.len() {
            EVM_ADDRESS_LEN => EvmAddress::from_slice(&self.bytes),
            n if n > 0 && n < EVM_ADDRESS_LEN => EvmAddress::from_partial(&self.bytes),
            _ => None,
        }
    }

    pub fn is_partial_address(&self) -> bool {
        !self.is_empty() && self.len() < EVM_ADDRESS_LEN
    }

    pub fn is_public_key(&self) -> bool {
        self.len() == EVM_HASH_LEN || self.len() == COMPRESSED_KEY_LEN
    }
}
