//! Config Module - Configuration management

use std::path::Path;
use serde::{Serialize, Deserialize};

/// Main configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Hard ceiling on total request processing time, streaming included.
    pub request_timeout_secs: u64,
    pub keep_alive_seconds: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: 60,
                keep_alive_seconds: 60,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "plain".to_string(),
            },
        }
    }
}

impl Config {
    /// Load from a TOML or JSON file, decided by extension.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await
            .map_err(|e| format!("Failed to read config: {}", e))?;

        let path_str = path.to_string_lossy();
        let config: Config = if path_str.ends_with(".toml") {
            toml::from_str(&content).map_err(|e| format!("Invalid TOML: {}", e))?
        } else if path_str.ends_with(".json") {
            serde_json::from_str(&content).map_err(|e| format!("Invalid JSON: {}", e))?
        } else {
            return Err("Unsupported config format".to_string());
        };

        Ok(config)
    }

    /// Validate config
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("Invalid server port".to_string());
        }

        if self.server.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Export config as TOML
    pub fn export_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))
    }
}
