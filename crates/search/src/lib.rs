//! Ledgerscope Search Crate
//!
//! This crate turns a free-form search string into the ledger entities it
//! could denote, by asking a mirror node about every plausible reading at
//! once.
//!
//! # Overview
//!
//! The search crate supports:
//! - Structured ids with optional HIP-15 checksums (`0.0.123-vfmkw`)
//! - Transaction ids, consensus timestamps and block heights (`#1234`)
//! - Hex byte sequences: hashes, public keys and EVM addresses
//! - Base32 account aliases and human-readable domain names
//! - Cancellable resolution with a latest-input-wins session
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |    raw input     |
//! +------------------+
//!          |
//!          v
//! +----------------------+
//! | IdentifierClassifier |  (first matching rule wins)
//! +----------------------+
//!          |
//!          v
//! +----------------------+
//! | SpeculativeResolver  |  (every accepting probe, concurrently)
//! +----------------------+
//!          |
//!          v
//! +----------------------+
//! |  EntityProbe x N     |  (account, contract, token, transaction, ...)
//! +----------------------+
//!          |
//!          v
//! +----------------------+
//! |  ResolutionOutcome   |  (candidates in priority order + error count)
//! +----------------------+
//! ```
//!
//! [`SearchEngine`] wraps classification and resolution for one network;
//! [`ResolutionSession`] drives an engine from a stream of inputs.
//!
//! # Core Types
//!
//! - [`Identifier`] - The classified shape of an input
//! - [`Candidate`] - One confirmed resolution with its navigation [`Route`]
//! - [`ResolutionOutcome`] - Merged candidates and the failure count
//! - [`NetworkConfig`] - Ledger id and mirror node base path of a network
//! - [`SearchError`] - Classification and lookup failures

pub mod checksum;
pub mod classifier;
pub mod domain_name;
pub mod engine;
pub mod errors;
pub mod mirror;
pub mod models;
pub mod probe;
pub mod resolver;
pub mod session;

// Re-export all public types from models
pub use models::{
    ByteSequence, Candidate, Entity, EntityId, EvmAddress, Identifier, IdentifierKind, LedgerId,
    NetworkConfig, OutcomeStatus, ProbeKind, ResolutionOutcome, Route, Timestamp, TransactionId,
};

pub use classifier::IdentifierClassifier;
pub use domain_name::{DomainNameResolver, DomainRecord, NoDomainNames, StaticDomainNames};
pub use engine::SearchEngine;
pub use errors::{NotFoundExt, OutcomeClass, SearchError};
pub use mirror::{HttpTransport, MirrorNode, MirrorSettings, MirrorTransport};
pub use probe::{EntityProbe, ProbeContext, ProbeSet};
pub use resolver::SpeculativeResolver;
pub use session::{Phase, ResolutionSession, SessionState};
