//! Raw GET access to the mirror node REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::SearchError;

/// Default timeout for mirror node requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read-only access to the query surface.
///
/// `path` is relative to the network's base path and includes the query
/// string, e.g. `/accounts?account.publickey=ab..&limit=2`. A 404 must be
/// reported as [`SearchError::NotFound`].
#[async_trait]
pub trait MirrorTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, SearchError>;
}

/// HTTP client settings.
#[derive(Clone, Debug)]
pub struct MirrorSettings {
    pub request_timeout: Duration,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Error body returned by the mirror node.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "_status")]
    status: Option<ErrorStatus>,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    messages: Vec<ErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// [`MirrorTransport`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `https://testnet.mirrornode.hedera.com/api/v1`).
    pub fn new(base_url: &str, settings: &MirrorSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.status)
            .and_then(|s| s.messages.into_iter().next())
            .map(|m| m.message)
            .unwrap_or_else(|| body.chars().take(200).collect())
    }
}

#[async_trait]
impl MirrorTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, SearchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Mirror node request: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout {
                    path: path.to_string(),
                }
            } else {
                SearchError::Network(e)
            }
        })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SearchError::NotFound {
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::MirrorNode {
                path: path.to_string(),
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::MalformedResponse {
                path: path.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_status_body() {
        let body = r#"{"_status":{"messages":[{"message":"Invalid parameter: idOrAliasOrEvmAddress"}]}}"#;
        assert_eq!(
            HttpTransport::error_message(body),
            "Invalid parameter: idOrAliasOrEvmAddress"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(HttpTransport::error_message("Bad Gateway"), "Bad Gateway");
        let long = "x".repeat(500);
        assert_eq!(HttpTransport::error_message(&long).len(), 200);
    }

    #[test]
    fn test_base_url_trimmed() {
        let transport =
            HttpTransport::new("http://localhost:5551/api/v1/", &MirrorSettings::default()).unwrap();
        assert_eq!(transport.base_url, "http://localhost:5551/api/v1");
    }
}
