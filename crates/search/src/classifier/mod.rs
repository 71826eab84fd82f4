//! Input classification.
//!
//! Turns a raw search string into one [`Identifier`]. Rules are tried in a
//! fixed order and the first match wins:
//!
//! ```text
//! StructuredId -> TransactionId -> ByteSequence -> Base32Alias -> Timestamp -> DomainName -> BlockNumber
//! ```
//!
//! A structured id with a wrong checksum stops classification: it is a
//! mistyped id, not some other kind of input.

use data_encoding::BASE32_NOPAD;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::checksum;
use crate::errors::SearchError;
use crate::models::{
    parse_fraction, ByteSequence, EntityId, Identifier, LedgerId, NetworkConfig, Timestamp,
    TransactionId,
};

/// Shortest decoded alias accepted as `Base32Alias`; shorter words are far
/// more likely to be typos than serialized keys.
const MIN_ALIAS_BYTES: usize = 20;

lazy_static! {
    static ref STRUCTURED_ID: Regex =
        Regex::new(r"^(\d{1,20})\.(\d{1,20})\.(\d{1,20})(?:-([A-Za-z]{5}))?$").unwrap();
    static ref TRANSACTION_ID_AT: Regex =
        Regex::new(r"^(\d{1,20})\.(\d{1,20})\.(\d{1,20})@(\d{1,19})(?:\.(\d{1,9}))?$").unwrap();
    static ref TRANSACTION_ID_DASH: Regex =
        Regex::new(r"^(\d{1,20})\.(\d{1,20})\.(\d{1,20})-(\d{1,19})-(\d{1,9})$").unwrap();
    static ref TIMESTAMP: Regex = Regex::new(r"^(\d{1,19})\.(\d{1,9})$").unwrap();
    static ref DOMAIN_NAME: Regex = Regex::new(r"^\S+\.[A-Za-zℏ]+$").unwrap();
    static ref BLOCK_NUMBER: Regex = Regex::new(r"^#(\d{1,19})$").unwrap();
}

/// Classifies raw input for one network.
#[derive(Clone, Debug)]
pub struct IdentifierClassifier {
    ledger_id: LedgerId,
}

impl IdentifierClassifier {
    pub fn new(ledger_id: LedgerId) -> Self {
        Self { ledger_id }
    }

    pub fn for_network(network: &NetworkConfig) -> Self {
        Self::new(network.ledger_id.clone())
    }

    /// Classifies `raw`, surrounding whitespace ignored.
    ///
    /// # Errors
    ///
    /// - [`SearchError::ChecksumInvalid`] for a structured id whose checksum
    ///   does not belong to this ledger
    /// - [`SearchError::Unrecognized`] when no rule matches, or an id
    ///   component does not fit in `u64`
    pub fn classify(&self, raw: &str) -> Result<Identifier, SearchError> {
        let text = raw.trim();

        if let Some(result) = self.structured_id(text) {
            return result;
        }
        if let Some(result) = transaction_id(text) {
            return result;
        }

        let identifier = byte_sequence(text)
            .or_else(|| base32_alias(text))
            .or_else(|| timestamp(text))
            .or_else(|| domain_name(text))
            .or_else(|| block_number(text));

        identifier.ok_or_else(|| SearchError::Unrecognized(text.to_string()))
    }

    fn structured_id(&self, text: &str) -> Option<Result<Identifier, SearchError>> {
        let caps = STRUCTURED_ID.captures(text)?;
        let id = match entity_id(&caps, text) {
            Ok(id) => id,
            Err(e) => return Some(Err(e)),
        };

        let checksum = caps.get(4).map(|m| m.as_str().to_ascii_lowercase());
        if let Some(checksum) = &checksum {
            let address = id.to_string();
            if !checksum::validate(&address, checksum, &self.ledger_id) {
                return Some(Err(SearchError::ChecksumInvalid {
                    address,
                    checksum: checksum.clone(),
                }));
            }
        }

        Some(Ok(Identifier::StructuredId { id, checksum }))
    }
}

/// Shard, realm and num from the first three captures. A component that
/// matches the digit pattern but overflows `u64` rejects the whole input.
fn entity_id(caps: &Captures, text: &str) -> Result<EntityId, SearchError> {
    let component = |i: usize| {
        caps[i]
            .parse::<u64>()
            .map_err(|_| SearchError::Unrecognized(text.to_string()))
    };
    Ok(EntityId::new(component(1)?, component(2)?, component(3)?))
}

fn transaction_id(text: &str) -> Option<Result<Identifier, SearchError>> {
    if let Some(caps) = TRANSACTION_ID_AT.captures(text) {
        let payer = match entity_id(&caps, text) {
            Ok(payer) => payer,
            Err(e) => return Some(Err(e)),
        };
        let seconds = caps[4].parse().ok()?;
        let nanos = match caps.get(5) {
            Some(fraction) => parse_fraction(fraction.as_str())?,
            None => 0,
        };
        let valid_start = Timestamp::new(seconds, nanos);
        return Some(Ok(Identifier::TransactionId(TransactionId::new(payer, valid_start))));
    }

    // The dash form carries an integer nanosecond count.
    let caps = TRANSACTION_ID_DASH.captures(text)?;
    let payer = match entity_id(&caps, text) {
        Ok(payer) => payer,
        Err(e) => return Some(Err(e)),
    };
    let valid_start = Timestamp::new(caps[4].parse().ok()?, caps[5].parse().ok()?);
    Some(Ok(Identifier::TransactionId(TransactionId::new(payer, valid_start))))
}

fn byte_sequence(text: &str) -> Option<Identifier> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() % 2 == 1 {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    Some(Identifier::ByteSequence(ByteSequence::new(bytes)))
}

fn base32_alias(text: &str) -> Option<Identifier> {
    // Canonical unpadded RFC 4648 only; lowercase input is accepted.
    let raw = text.to_ascii_uppercase();
    let bytes = BASE32_NOPAD.decode(raw.as_bytes()).ok()?;
    if bytes.len() < MIN_ALIAS_BYTES {
        return None;
    }
    Some(Identifier::Base32Alias { raw })
}

fn timestamp(text: &str) -> Option<Identifier> {
    let caps = TIMESTAMP.captures(text)?;
    let seconds = caps[1].parse().ok()?;
    let nanos = parse_fraction(&caps[2])?;
    Some(Identifier::Timestamp(Timestamp::new(seconds, nanos)))
}

fn domain_name(text: &str) -> Option<Identifier> {
    if !DOMAIN_NAME.is_match(text) {
        return None;
    }
    Some(Identifier::DomainName {
        raw: text.to_string(),
    })
}

fn block_number(text: &str) -> Option<Identifier> {
    let caps = BLOCK_NUMBER.captures(text)?;
    Some(Identifier::BlockNumber(caps[1].parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentifierKind;

    fn mainnet() -> IdentifierClassifier {
        IdentifierClassifier::for_network(&NetworkConfig::mainnet())
    }

    #[test]
    fn test_structured_id() {
        let id = mainnet().classify("0.0.3").unwrap();
        assert_eq!(
            id,
            Identifier::StructuredId {
                id: EntityId::new(0, 0, 3),
                checksum: None,
            }
        );
    }

    #[test]
    fn test_structured_id_with_valid_checksum() {
        let id = mainnet().classify(" 0.0.123-VFMKW ").unwrap();
        assert_eq!(
            id,
            Identifier::StructuredId {
                id: EntityId::new(0, 0, 123),
                checksum: Some("vfmkw".to_string()),
            }
        );
    }

    #[test]
    fn test_structured_id_with_wrong_network_checksum() {
        // esxsf is the testnet checksum of 0.0.123.
        let err = mainnet().classify("0.0.123-esxsf").unwrap_err();
        match err {
            SearchError::ChecksumInvalid { address, checksum } => {
                assert_eq!(address, "0.0.123");
                assert_eq!(checksum, "esxsf");
            }
            other => panic!("Expected ChecksumInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_transaction_id_forms() {
        let expected = Identifier::TransactionId(TransactionId::new(
            EntityId::new(0, 0, 2),
            Timestamp::new(1627434000, 0),
        ));
        assert_eq!(mainnet().classify("0.0.2@1627434000.000000000").unwrap(), expected);
        assert_eq!(mainnet().classify("0.0.2@1627434000").unwrap(), expected);
        assert_eq!(mainnet().classify("0.0.2-1627434000-000000000").unwrap(), expected);
        assert_eq!(mainnet().classify("0.0.2-1627434000-0").unwrap(), expected);
    }

    #[test]
    fn test_transaction_id_nanos() {
        let at = mainnet().classify("0.0.2@1627434000.5").unwrap();
        let dash = mainnet().classify("0.0.2-1627434000-5").unwrap();
        match (at, dash) {
            (Identifier::TransactionId(at), Identifier::TransactionId(dash)) => {
                assert_eq!(at.valid_start.nanos, 500_000_000);
                assert_eq!(dash.valid_start.nanos, 5);
            }
            other => panic!("Expected transaction ids, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_sequences() {
        let classifier = mainnet();
        for len in [48usize, 33, 32, 20, 2] {
            let hex = "ab".repeat(len);
            for input in [hex.clone(), format!("0x{}", hex)] {
                match classifier.classify(&input).unwrap() {
                    Identifier::ByteSequence(bytes) => assert_eq!(bytes.len(), len),
                    other => panic!("Expected ByteSequence for {}, got {:?}", input, other),
                }
            }
        }
    }

    #[test]
    fn test_digits_are_hex_first() {
        let id = mainnet().classify("1234").unwrap();
        assert_eq!(id, Identifier::ByteSequence(ByteSequence::new(vec![0x12, 0x34])));
    }

    #[test]
    fn test_base32_alias() {
        let mut key = vec![0x12, 0x20];
        key.extend_from_slice(&[0x5a; 32]);
        let alias = BASE32_NOPAD.encode(&key);
        let id = mainnet().classify(&alias.to_ascii_lowercase()).unwrap();
        assert_eq!(id, Identifier::Base32Alias { raw: alias });
    }

    #[test]
    fn test_short_words_are_not_aliases() {
        assert!(mainnet().classify("hello").is_err());
    }

    #[test]
    fn test_timestamp() {
        let id = mainnet().classify("1627434000.000000001").unwrap();
        assert_eq!(id, Identifier::Timestamp(Timestamp::new(1627434000, 1)));
    }

    #[test]
    fn test_domain_names() {
        for name in ["alice.hbar", "bob.ℏ", "sub.domain.Web"] {
            assert_eq!(mainnet().classify(name).unwrap().kind(), IdentifierKind::DomainName);
        }
        assert!(mainnet().classify("alice.").is_err());
        assert!(mainnet().classify("alice.h3").is_err());
    }

    #[test]
    fn test_block_number() {
        assert_eq!(mainnet().classify("#1234").unwrap(), Identifier::BlockNumber(1234));
    }

    #[test]
    fn test_unrecognized() {
        for input in ["", "   ", "0.0.3.4", "zz-top", "0x", "abc"] {
            assert!(
                matches!(mainnet().classify(input), Err(SearchError::Unrecognized(_))),
                "{} should be unrecognized",
                input
            );
        }
    }

    #[test]
    fn test_component_overflow_is_unrecognized() {
        let too_big = "18446744073709551616";
        for input in [
            format!("{}.0.0", too_big),
            format!("0.0.{}", too_big),
            format!("0.{}.1-vfmkw", too_big),
            format!("{}.0.2@1627434000", too_big),
            format!("0.0.{}-1627434000-0", too_big),
        ] {
            assert!(
                matches!(mainnet().classify(&input), Err(SearchError::Unrecognized(_))),
                "{} should be unrecognized",
                input
            );
        }
    }

    #[test]
    fn test_max_component_still_parses() {
        let input = format!("0.0.{}", u64::MAX);
        let id = mainnet().classify(&input).unwrap();
        assert_eq!(
            id,
            Identifier::StructuredId {
                id: EntityId::new(0, 0, u64::MAX),
                checksum: None,
            }
        );
    }

    #[test]
    fn test_lowercase_alias_is_normalized() {
        let key = [0x5a; 21];
        let alias = BASE32_NOPAD.encode(&key);
        assert_eq!(alias, "LJNFUWS2LJNFUWS2LJNFUWS2LJNFUWS2LI");
        let id = mainnet().classify(&alias.to_ascii_lowercase()).unwrap();
        assert_eq!(id, Identifier::Base32Alias { raw: alias });
    }

    #[test]
    fn test_non_canonical_alias_rejected() {
        // Same length as a valid 21-byte alias, but the unused trailing bits are set.
        let input = "LJNFUWS2LJNFUWS2LJNFUWS2LJNFUWS2LJ";
        assert!(matches!(mainnet().classify(input), Err(SearchError::Unrecognized(_))));
        // 33 characters can never be a whole number of bytes.
        assert!(mainnet().classify(&format!("{}L", "LJNFUWS2".repeat(4))).is_err());
    }
}
