//! Connection details fetched from an external issuer.

use crate::details::ConnectionDetails;
use crate::error::VoiceError;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a connection-details endpoint hosted elsewhere.
#[derive(Debug, Clone)]
pub struct RemoteConnectionDetails {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteConnectionDetails {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches fresh credentials.
    ///
    /// A non-success status surfaces the body's `error` field when present,
    /// otherwise `HTTP <status>`.
    pub async fn fetch(&self) -> Result<ConnectionDetails, VoiceError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(VoiceError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| VoiceError::Upstream {
            status: status.as_u16(),
            message: format!("malformed connection details: {}", e),
        })
    }
}
