//! Settings file management

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;
use crate::logs::LogLevel;

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Remote API configuration
    #[serde(default)]
    pub remote: RemoteSettings,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Session idle TTL in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Enable the session sweeper worker
    #[serde(default = "default_true")]
    pub enable_sweeper: bool,

    /// Sweep interval in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            remote: RemoteSettings::default(),
            server: ServerSettings::default(),
            session_ttl_secs: default_session_ttl(),
            enable_sweeper: true,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConsoleError> {
        let bytes = tokio::fs::read(path).await?;
        let settings = serde_json::from_slice(&bytes)?;
        Ok(settings)
    }
}

/// Remote environment-management API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Base URL for the remote API
    #[serde(default = "default_remote_url")]
    pub base_url: String,
}

fn default_remote_url() -> String {
    "http://localhost:8082/v1".to_string()
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: default_remote_url(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_from_empty_object() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.server.port, 8080);
        assert!(settings.enable_sweeper);
        assert_eq!(settings.session_ttl_secs, 3600);
    }

    #[test]
    fn test_settings_partial_override() {
        let settings: Settings = serde_json::from_str(
            r#"{"log_level": "debug", "remote": {"base_url": "https://api.example.com/v1"}}"#,
        )
        .unwrap();
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.remote.base_url, "https://api.example.com/v1");
        assert_eq!(settings.server.host, "127.0.0.1");
    }
}
