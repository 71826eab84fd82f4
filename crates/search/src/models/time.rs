use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Consensus timestamp with nanosecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: u64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn new(seconds: u64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Parses the mirror node form `seconds.nnnnnnnnn`.
    ///
    /// The fractional part is a decimal fraction: `"5.1"` is 5.1 seconds.
    pub fn parse(text: &str) -> Option<Self> {
        let (seconds, fraction) = match text.split_once('.') {
            Some((s, f)) => (s, Some(f)),
            None => (text, None),
        };
        if seconds.is_empty() || !seconds.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let seconds = seconds.parse().ok()?;
        let nanos = match fraction {
            Some(f) => parse_fraction(f)?,
            None => 0,
        };
        Some(Self { seconds, nanos })
    }

    /// UTC rendering for display, e.g. `2021-07-28 01:00:00.000000000 UTC`.
    pub fn to_utc_string(&self) -> Option<String> {
        let seconds = i64::try_from(self.seconds).ok()?;
        let datetime: DateTime<Utc> = DateTime::from_timestamp(seconds, self.nanos)?;
        Some(datetime.format("%Y-%m-%d %H:%M:%S%.9f UTC").to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

/// Right-pads up to nine fractional digits into nanoseconds.
pub(crate) fn parse_fraction(digits: &str) -> Option<u32> {
    if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{:0<9}", digits);
    padded.parse().ok()
}

/// Transaction id: payer account plus valid-start timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub payer: EntityId,
    pub valid_start: Timestamp,
}

impl TransactionId {
    pub fn new(payer: EntityId, valid_start: Timestamp) -> Self {
        Self { payer, valid_start }
    }

    /// The dash form used in mirror node paths: `0.0.2-1627434000-000000000`.
    pub fn normalized(&self) -> String {
        format!(
            "{}-{}-{:09}",
            self.payer, self.valid_start.seconds, self.valid_start.nanos
        )
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.payer, self.valid_start)
    }
}
