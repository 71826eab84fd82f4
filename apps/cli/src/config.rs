use std::time::Duration;

use anyhow::{anyhow, Context};
use ledgerscope_search::{LedgerId, MirrorSettings, NetworkConfig};

pub struct Config {
    pub network: NetworkConfig,
    pub mirror: MirrorSettings,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let name = lookup("LEDGERSCOPE_NETWORK").unwrap_or_else(|| "mainnet".into());
        let mirror_url = lookup("LEDGERSCOPE_MIRROR_URL");
        let ledger_id = lookup("LEDGERSCOPE_LEDGER_ID")
            .map(|hex| {
                LedgerId::from_hex(&hex)
                    .with_context(|| format!("Invalid LEDGERSCOPE_LEDGER_ID {hex}"))
            })
            .transpose()?;

        let network = match (NetworkConfig::preset(&name), mirror_url, ledger_id) {
            (Some(preset), url, id) => NetworkConfig::new(
                preset.name,
                id.unwrap_or(preset.ledger_id),
                url.unwrap_or(preset.mirror_base_url),
            ),
            (None, Some(url), Some(id)) => NetworkConfig::new(name, id, url),
            (None, _, _) => {
                return Err(anyhow!(
                    "Unknown network '{name}': set LEDGERSCOPE_MIRROR_URL and LEDGERSCOPE_LEDGER_ID for a custom network"
                ))
            }
        };

        let timeout_ms: u64 = lookup("LEDGERSCOPE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".into())
            .parse()
            .context("Invalid LEDGERSCOPE_REQUEST_TIMEOUT_MS")?;
        let log_format = lookup("LEDGERSCOPE_LOG_FORMAT").unwrap_or_else(|| "text".into());

        Ok(Self {
            network,
            mirror: MirrorSettings {
                request_timeout: Duration::from_millis(timeout_ms),
            },
            log_format,
        })
    }
}
