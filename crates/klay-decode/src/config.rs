//! # Decoder Configuration
//!
//! Knobs that change how strictly payloads are interpreted.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Upper bound on weighted keys in one multisig account key.
pub const MAX_WEIGHTED_KEYS: usize = 10;

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Reject account type codes other than EOA (1) and smart contract (2).
    ///
    /// Off by default: unknown codes decode as smart contracts.
    pub strict_account_type: bool,
    /// Maximum number of weighted keys accepted in a multisig key (1..=10).
    pub max_weighted_keys: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl DecoderConfig {
    /// Lenient account types, network key limit.
    pub const fn standard() -> Self {
        Self {
            strict_account_type: false,
            max_weighted_keys: MAX_WEIGHTED_KEYS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `KLAY_DECODE_STRICT_ACCOUNT_TYPE`: `true`/`1` to reject unknown account types (default: false)
    /// - `KLAY_DECODE_MAX_WEIGHTED_KEYS`: multisig key limit (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = env::var("KLAY_DECODE_STRICT_ACCOUNT_TYPE") {
            config.strict_account_type = parse_flag("KLAY_DECODE_STRICT_ACCOUNT_TYPE", &v)?;
        }

        if let Ok(v) = env::var("KLAY_DECODE_MAX_WEIGHTED_KEYS") {
            config.max_weighted_keys = v.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                name: "KLAY_DECODE_MAX_WEIGHTED_KEYS",
                value: v.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_weighted_keys == 0 || self.max_weighted_keys > MAX_WEIGHTED_KEYS {
            return Err(ConfigError::InvalidLimit(format!(
                "max_weighted_keys must be in 1..={MAX_WEIGHTED_KEYS}, got {}",
                self.max_weighted_keys
            )));
        }
        Ok(())
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Environment variable that cannot be parsed
    #[error("invalid value {value:?} for {name}")]
    InvalidEnvVar { name: &'static str, value: String },
}
