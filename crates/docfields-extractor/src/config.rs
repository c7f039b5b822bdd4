//! Configuration for the field extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the field extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single backend call (seconds)
    pub backend_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the backend timeout as a Duration
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.backend_timeout_secs == 0 {
            return Err("backend_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Aggressive preset: shorter timeout, smaller documents
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 20_000,
            backend_timeout_secs: 60,
        }
    }

    /// Lenient preset: longer timeout, larger documents
    pub fn lenient() -> Self {
        Self {
            max_text_length: 100_000,
            backend_timeout_secs: 300,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            backend_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_text_length, 50_000);
        assert_eq!(config.backend_timeout_secs, 120);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_text_length_is_invalid() {
        let mut config = ExtractorConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = ExtractorConfig::default();
        config.backend_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.backend_timeout_secs, parsed.backend_timeout_secs);
    }
}
