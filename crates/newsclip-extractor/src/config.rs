//! Configuration for classification and extraction

use serde::{Deserialize, Serialize};

/// Thresholds applied by the classifier and extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Minimum visible body text for a page to be supported (characters)
    pub min_text_len: usize,

    /// Minimum cleaned text for a candidate element to count as content
    /// (characters); rejects boilerplate containers
    pub valid_content_len: usize,

    /// Hard cap on returned content (characters)
    pub content_max: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_text_len: 100,
            valid_content_len: 200,
            content_max: newsclip_domain::limits::CONTENT_MAX,
        }
    }
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.content_max == 0 {
            return Err("content_max must be greater than 0".to_string());
        }
        if self.valid_content_len > self.content_max {
            return Err("valid_content_len cannot exceed content_max".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}
