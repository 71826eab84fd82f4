use serde::Serialize;

use super::Candidate;

/// How the presentation layer should read an outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeStatus {
    /// At least one candidate.
    Results,
    /// Nothing found and nothing failed.
    NoMatch,
    /// Nothing found and at least one probe failed.
    Failure,
}

/// Merged result of one resolution.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionOutcome {
    /// Candidates in probe priority order.
    pub candidates: Vec<Candidate>,
    /// Probe failures other than "not found".
    pub error_count: u32,
    /// `0x` form of a 20-byte input, shown even when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evm_address: Option<String>,
}

impl ResolutionOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn status(&self) -> OutcomeStatus {
        if !self.candidates.is_empty() {
            OutcomeStatus::Results
        } else if self.error_count == 0 {
            OutcomeStatus::NoMatch
        } else {
            OutcomeStatus::Failure
        }
    }
}
