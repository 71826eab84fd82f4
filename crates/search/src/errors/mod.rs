//! Error types and outcome classification for the search crate.
//!
//! This module provides:
//! - [`SearchError`]: The main error enum for classification and lookups
//! - [`OutcomeClass`]: How an error is accounted for in a resolution outcome
//! - [`NotFoundExt`]: Adapter turning "not found" into an empty result

mod class;

pub use class::OutcomeClass;

use thiserror::Error;

/// Errors that can occur while classifying input or querying the ledger.
///
/// Each variant is classified into an [`OutcomeClass`] via the
/// [`outcome_class`](Self::outcome_class) method, which decides whether the
/// resolver counts it as a failure.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The mirror node answered 404 for this path.
    #[error("Not found: {path}")]
    NotFound {
        /// The request path that was not found
        path: String,
    },

    /// The request to the mirror node timed out.
    #[error("Timeout: {path}")]
    Timeout {
        /// The request path that timed out
        path: String,
    },

    /// The mirror node answered with a non-success status other than 404.
    #[error("Mirror node error: {path} - HTTP {status} {message}")]
    MirrorNode {
        /// The request path
        path: String,
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed response: {path} - {message}")]
    MalformedResponse {
        /// The request path
        path: String,
        /// The decoding error
        message: String,
    },

    /// The external domain name service failed.
    #[error("Domain name resolution failed: {message}")]
    DomainResolver {
        /// Description of the failure
        message: String,
    },

    /// A structured id carried a checksum that does not match the network.
    #[error("Invalid checksum: {address}-{checksum}")]
    ChecksumInvalid {
        /// The `shard.realm.num` part of the input
        address: String,
        /// The checksum as typed by the user
        checksum: String,
    },

    /// The input matches no known identifier shape.
    #[error("Unrecognized input: {0}")]
    Unrecognized(String),

    /// The resolution session is no longer running.
    #[error("Resolution session closed")]
    SessionClosed,

    /// A transport error occurred while talking to the mirror node.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SearchError {
    /// Returns the outcome classification for this error.
    ///
    /// ```
    /// use ledgerscope_search::errors::{OutcomeClass, SearchError};
    ///
    /// let error = SearchError::NotFound { path: "/accounts/0.0.98".to_string() };
    /// assert_eq!(error.outcome_class(), OutcomeClass::Absent);
    ///
    /// let error = SearchError::Unrecognized("???".to_string());
    /// assert_eq!(error.outcome_class(), OutcomeClass::Rejected);
    /// ```
    pub fn outcome_class(&self) -> OutcomeClass {
        match self {
            Self::NotFound { .. } => OutcomeClass::Absent,

            Self::ChecksumInvalid { .. } | Self::Unrecognized(_) => OutcomeClass::Rejected,

            Self::Timeout { .. }
            | Self::MirrorNode { .. }
            | Self::MalformedResponse { .. }
            | Self::DomainResolver { .. }
            | Self::SessionClosed
            | Self::Network(_) => OutcomeClass::Failure,
        }
    }

    /// True when the error only means "this interpretation does not exist".
    pub fn is_not_found(&self) -> bool {
        self.outcome_class() == OutcomeClass::Absent
    }
}

/// Converts a 404 into `Ok(None)` so callers can treat absence as data.
pub trait NotFoundExt<T> {
    fn found(self) -> Result<Option<T>, SearchError>;
}

impl<T> NotFoundExt<T> for Result<T, SearchError> {
    fn found(self) -> Result<Option<T>, SearchError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
