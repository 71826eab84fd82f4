//! Search models
//!
//! This module contains the core data types of the search engine:
//! - `entity_id` - Structured `shard.realm.num` ids and their EVM address forms
//! - `time` - Consensus timestamps and transaction ids
//! - `identifier` - The classified shape of a raw input (Identifier, ByteSequence)
//! - `network` - Ledger ids and network configuration
//! - `candidate` - A confirmed resolution (Candidate, Route, ProbeKind)
//! - `outcome` - The merged result of one resolution (ResolutionOutcome)

mod candidate;
mod entity_id;
mod identifier;
mod network;
mod outcome;
mod time;

pub use candidate::{Candidate, Entity, ProbeKind, Route};
pub use entity_id::{EntityId, EvmAddress};
pub use identifier::{ByteSequence, Identifier, IdentifierKind};
pub use network::{LedgerId, NetworkConfig};
pub use outcome::{OutcomeStatus, ResolutionOutcome};
pub use time::{Timestamp, TransactionId};

pub(crate) use identifier::{EVM_ADDRESS_LEN, EVM_HASH_LEN, NATIVE_HASH_LEN};
pub(crate) use time::parse_fraction;
