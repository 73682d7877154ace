//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, JWT secret, token
//! expiry, database path, and the completion-provider credentials.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// JWT secret for signing session tokens
    pub jwt_secret: String,

    /// Session token expiry in seconds (default: 604800 = 7 days)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,

    /// SQLite database path
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Completion provider API key; calls fail with a provider error when
    /// unset
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Completion provider API base
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
}

/// Default token expiry: 7 days
fn default_token_expiry() -> u64 {
    604_800
}

fn default_database_path() -> String {
    "newsclip.db".to_string()
}

fn default_openai_base_url() -> String {
    newsclip_summarizer::openai::DEFAULT_BASE_URL.to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;

        if config.jwt_secret.is_empty() {
            return Err(ConfigError::MissingField("jwt_secret".to_string()));
        }

        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            jwt_secret: "test-secret-key-do-not-use-in-production".to_string(),
            token_expiry_secs: 604_800,
            database_path: ":memory:".to_string(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default_test_config();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.token_expiry_secs, 604_800);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            jwt_secret = "my-secret"
            database_path = "data/newsclip.db"
            openai_api_key = "sk-test"
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.bind_port, 9000);
        assert_eq!(config.database_path, "data/newsclip.db");
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        // Defaults fill in
        assert_eq!(config.token_expiry_secs, 604_800);
        assert!(config.openai_base_url.contains("api.openai.com"));
    }
}
