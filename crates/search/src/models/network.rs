use std::fmt;

/// Bytes identifying one ledger (HIP-198). Mainnet is `0x00`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LedgerId(Vec<u8>);

impl LedgerId {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decodes a hex ledger id; an odd-length string gets a leading zero nibble.
    pub fn from_hex(text: &str) -> Result<Self, hex::FromHexError> {
        let text = text.trim_start_matches("0x");
        let bytes = if text.len() % 2 == 1 {
            hex::decode(format!("0{}", text))?
        } else {
            hex::decode(text)?
        };
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

/// Network the engine searches.
///
/// Threaded into the classifier (checksums) and probes (query base path)
/// at construction time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkConfig {
    /// Short name used in routes and sent to the domain name service.
    pub name: String,
    pub ledger_id: LedgerId,
    /// Mirror node REST base, including the `/api/v1` prefix.
    pub mirror_base_url: String,
}

impl NetworkConfig {
    pub fn new(
        name: impl Into<String>,
        ledger_id: LedgerId,
        mirror_base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ledger_id,
            mirror_base_url: mirror_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(
            "mainnet",
            LedgerId::new(vec![0x00]),
            "https://mainnet-public.mirrornode.hedera.com/api/v1",
        )
    }

    pub fn testnet() -> Self {
        Self::new(
            "testnet",
            LedgerId::new(vec![0x01]),
            "https://testnet.mirrornode.hedera.com/api/v1",
        )
    }

    pub fn previewnet() -> Self {
        Self::new(
            "previewnet",
            LedgerId::new(vec![0x02]),
            "https://previewnet.mirrornode.hedera.com/api/v1",
        )
    }

    /// Looks up a built-in network by name (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mainnet" => Some(Self::mainnet()),
            "testnet" => Some(Self::testnet()),
            "previewnet" => Some(Self::previewnet()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_id_from_hex() {
        assert_eq!(LedgerId::from_hex("00").unwrap().as_bytes(), &[0x00]);
        assert_eq!(LedgerId::from_hex("0x01").unwrap().as_bytes(), &[0x01]);
        assert_eq!(LedgerId::from_hex("3").unwrap().as_bytes(), &[0x03]);
        assert_eq!(LedgerId::from_hex("123").unwrap().as_bytes(), &[0x01, 0x23]);
        assert!(LedgerId::from_hex("zz").is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(NetworkConfig::preset("TESTNET").unwrap().ledger_id.to_string(), "01");
        assert_eq!(NetworkConfig::preset("previewnet").unwrap().name, "previewnet");
        assert!(NetworkConfig::preset("localnet").is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let network = NetworkConfig::new("local", LedgerId::new(vec![3]), "http://localhost:5551/api/v1/");
        assert_eq!(network.mirror_base_url, "http://localhost:5551/api/v1");
    }
}
