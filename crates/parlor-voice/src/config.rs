//! Credentials for issuing voice session connection details locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Join tokens handed to the widget expire after 15 minutes unless configured.
fn default_token_ttl_seconds() -> u64 {
    900
}

/// LiveKit server address and API credentials used by
/// [`VoiceService::issue_connection_details`](crate::VoiceService::issue_connection_details)
/// to mint a participant token for each new widget session.
///
/// Every field may be left empty in the config file and filled from the
/// `LIVEKIT_*` environment variables; an incomplete set only fails when a
/// widget actually asks for connection details.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    /// WebSocket URL returned to the widget as `serverUrl`.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// Lifetime of each issued participant token, in seconds.
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: u64,
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl LiveKitConfig {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_ttl_seconds: default_token_ttl_seconds(),
        }
    }

    /// Environment variable name of the first setting still empty, checked
    /// in the order url, key, secret.
    pub fn missing_setting(&self) -> Option<&'static str> {
        [
            ("LIVEKIT_URL", &self.url),
            ("LIVEKIT_API_KEY", &self.api_key),
            ("LIVEKIT_API_SECRET", &self.api_secret),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}
