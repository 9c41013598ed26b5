//! Engine configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// What to do with a requirement whose kind has no registered evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRequirementPolicy {
    /// Abort resolution with [`crate::ResolveError::UnknownRequirement`].
    #[default]
    Error,
    /// Log a warning and treat the requirement as not satisfied.
    Unsatisfied,
}

/// Settings for the external arbitration client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrationConfig {
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "dgdl-conditional-engine".to_string()
}

impl ArbitrationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ArbitrationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub unknown_requirement: UnknownRequirementPolicy,

    #[serde(default)]
    pub arbitration: ArbitrationConfig,
}

impl EngineConfig {
    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.unknown_requirement, UnknownRequirementPolicy::Error);
        assert_eq!(config.arbitration.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            unknown_requirement = "unsatisfied"

            [arbitration]
            timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(
            config.unknown_requirement,
            UnknownRequirementPolicy::Unsatisfied
        );
        assert_eq!(config.arbitration.timeout_ms, 250);
        assert_eq!(config.arbitration.user_agent, "dgdl-conditional-engine");
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let result = EngineConfig::from_toml_str(r#"unknown_requirement = "ignore""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::from_file("/nonexistent/engine.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
