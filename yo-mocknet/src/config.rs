//! Configuration for the mock network

use crate::{NetworkError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Log levels accepted in `log_level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Mock network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Legal names of the participants, one node each
    pub node_names: Vec<String>,
    /// Payload used by Yo flows when none is given
    pub default_payload: String,
    /// Log level for binaries driving the network
    pub log_level: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_names: vec!["Alice".to_string(), "Bob".to_string()],
            default_payload: yo_core::DEFAULT_PAYLOAD.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl NetworkConfig {
    /// Load and validate a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NetworkError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NetworkConfig = toml::from_str(content)
            .map_err(|e| NetworkError::Configuration(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| NetworkError::Configuration(format!("Failed to encode TOML: {}", e)))
    }

    /// Write the configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| {
            NetworkError::Configuration(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_names.len() < 2 {
            return Err(NetworkError::Configuration(
                "At least two nodes are required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.node_names {
            if name.trim().is_empty() {
                return Err(NetworkError::Configuration(
                    "Node names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(NetworkError::Configuration(format!(
                    "Duplicate node name: {}",
                    name
                )));
            }
        }

        if self.default_payload.is_empty() {
            return Err(NetworkError::Configuration(
                "Default payload must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(NetworkError::Configuration(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NetworkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.node_names, vec!["Alice", "Bob"]);
        assert_eq!(config.default_payload, "Yo!");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = NetworkConfig {
            node_names: vec!["Alice".into(), "Bob".into(), "Carol".into()],
            default_payload: "Hey".into(),
            log_level: "debug".into(),
        };
        let encoded = config.to_toml_string().unwrap();
        assert_eq!(NetworkConfig::from_toml_str(&encoded).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = NetworkConfig::from_toml_str("default_payload = \"Hi\"").unwrap();
        assert_eq!(config.node_names, vec!["Alice", "Bob"]);
        assert_eq!(config.default_payload, "Hi");
    }

    #[test]
    fn test_validation_failures() {
        let mut config = NetworkConfig::default();
        config.node_names = vec!["Alice".into()];
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.node_names = vec!["Alice".into(), "Alice".into()];
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.default_payload.clear();
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.log_level = "loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = NetworkConfig::from_toml_str("node_names = 3");
        assert!(matches!(result, Err(NetworkError::Configuration(_))));
    }
}
