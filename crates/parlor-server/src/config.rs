//! Server configuration loading from file and environment variables.

use parlor_types::EmbedAppConfig;
use parlor_voice::LiveKitConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Deployment text used as widget title/subtitle fallbacks.
    #[serde(default)]
    pub app: EmbedAppConfig,

    /// LiveKit credentials for locally issued connection details.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Where connection details come from.
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin embedded in generated snippets, e.g. `https://widget.example.com`.
    ///
    /// When unset the origin is taken from each request's forwarding headers.
    #[serde(default)]
    pub public_url: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "parlor_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Connection-details source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionConfig {
    /// External endpoint returning connection details. Local LiveKit
    /// issuance is used when unset.
    #[serde(default)]
    pub details_endpoint: Option<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PARLOR_HOST` overrides `server.host`
/// - `PARLOR_PORT` overrides `server.port`
/// - `PARLOR_PUBLIC_URL` overrides `server.public_url`
/// - `PARLOR_LOG_LEVEL` overrides `logging.level`
/// - `PARLOR_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PARLOR_PAGE_TITLE` / `PARLOR_PAGE_DESCRIPTION` override `app`
/// - `LIVEKIT_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET` override `livekit`
/// - `PARLOR_CONN_DETAILS_ENDPOINT` overrides `connection.details_endpoint`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides from `lookup`, which maps a variable name to its value.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("PARLOR_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("PARLOR_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(url) = lookup("PARLOR_PUBLIC_URL") {
        config.server.public_url = Some(url).filter(|u| !u.trim().is_empty());
    }
    if let Some(level) = lookup("PARLOR_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("PARLOR_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(title) = lookup("PARLOR_PAGE_TITLE") {
        config.app.page_title = title;
    }
    if let Some(description) = lookup("PARLOR_PAGE_DESCRIPTION") {
        config.app.page_description = description;
    }
    if let Some(url) = lookup("LIVEKIT_URL") {
        config.livekit.url = url;
    }
    if let Some(key) = lookup("LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Some(secret) = lookup("LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }
    if let Some(endpoint) = lookup("PARLOR_CONN_DETAILS_ENDPOINT") {
        config.connection.details_endpoint = Some(endpoint).filter(|e| !e.trim().is_empty());
    }
}
