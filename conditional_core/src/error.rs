//! Error types for conditional resolution and its collaborators.

use thiserror::Error;

/// Failure to resolve a conditional.
///
/// Data-shape problems never surface here; they make a requirement
/// unsatisfied instead. Only configuration defects are reported upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no evaluator registered for requirement kind '{kind}'")]
    UnknownRequirement { kind: String },
}

/// Failure talking to an external arbitration endpoint.
#[derive(Debug, Error)]
pub enum ArbitrationError {
    #[error("request to {uri} failed: {source}")]
    Transport {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("endpoint {uri} answered with status {status}")]
    Status { uri: String, status: u16 },
    #[error("could not decode response from {uri}: {message}")]
    Decode { uri: String, message: String },
}

/// Failure loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure preparing protocol text for metadata extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("protocol source is empty")]
    EmptySource,
}
