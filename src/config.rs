//! Generator configuration.
//!
//! Primitive choices and scheduling thresholds are configuration, not
//! code: deterministic output is a function of these values plus the
//! entropy sequence, so deployments that need reproducible streams must
//! pin them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::keystream::CipherAlgorithm;
use crate::mixing::HashAlgorithm;

/// Configuration for a generator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Hash used for pool accumulation.
    pub hash: HashAlgorithm,
    /// Stream cipher used for output generation.
    pub cipher: CipherAlgorithm,
    /// Pending bytes consumed per scheduled reseed of the insecure pool.
    pub reseed_bytes: u64,
    /// Reseed events the insecure pool must strictly exceed before its
    /// first output.
    pub min_reseeds: u64,
    /// Cipher blocks one key may produce before a forced rekey.
    pub key_block_budget: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            hash: HashAlgorithm::default(),
            cipher: CipherAlgorithm::default(),
            reseed_bytes: 2048,
            min_reseeds: 32,
            key_block_budget: 1 << 20, // 64 MiB per key
        }
    }
}

impl GeneratorConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reseed_bytes == 0 {
            return Err(ConfigError::InvalidReseedBytes);
        }
        if self.key_block_budget == 0 {
            return Err(ConfigError::InvalidBlockBudget);
        }
        Ok(())
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig =
            toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("reseed_bytes must be at least 1")]
    InvalidReseedBytes,
    #[error("key_block_budget must be at least 1")]
    InvalidBlockBudget,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}
