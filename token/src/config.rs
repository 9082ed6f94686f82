//! Token configuration with TOML file support.

use std::path::Path;

use ballast_types::{Amount, TokenParams, BASIS_POINTS};
use ballast_utils::{try_init_logging, LogFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::TokenMetadata;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a bonded token.
///
/// Can be loaded from a TOML file via [`TokenConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Amounts are raw units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Transfer tax numerator in basis points.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    #[serde(default = "default_basis_points")]
    pub basis_points: u32,

    /// Backing pulled from the owner on initialization.
    #[serde(default = "default_seed")]
    pub seed_backing: u128,

    /// Ledger units credited to the owner on initialization.
    #[serde(default = "default_seed")]
    pub seed_ledger: u128,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_name() -> String {
    "Ballast".into()
}

fn default_symbol() -> String {
    "BLST".into()
}

fn default_decimals() -> u8 {
    18
}

fn default_tax_rate_bps() -> u32 {
    100
}

fn default_basis_points() -> u32 {
    BASIS_POINTS
}

fn default_seed() -> u128 {
    1_000_000_000_000_000_000
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            tax_rate_bps: default_tax_rate_bps(),
            basis_points: default_basis_points(),
            seed_backing: default_seed(),
            seed_ledger: default_seed(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl TokenConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        self.params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn params(&self) -> TokenParams {
        TokenParams {
            tax_rate_bps: self.tax_rate_bps,
            basis_points: self.basis_points,
            seed_backing: Amount::from(self.seed_backing),
            seed_ledger: Amount::from(self.seed_ledger),
        }
    }

    /// Install the global tracing subscriber with the configured format and
    /// level. Returns `false` if one is already installed.
    pub fn init_logging(&self) -> bool {
        try_init_logging(self.log_format, &self.log_level)
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = TokenConfig::from_toml_str("").unwrap();
        assert_eq!(config, TokenConfig::default());
        assert_eq!(config.params(), TokenParams::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = TokenConfig::from_toml_str(
            r#"
            name = "Anchor"
            symbol = "ANC"
            tax_rate_bps = 250
            seed_backing = 1000
            seed_ledger = 1000
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.symbol, "ANC");
        assert_eq!(config.log_format, LogFormat::Json);
        let params = config.params();
        assert_eq!(params.tax_rate_bps, 250);
        assert_eq!(params.basis_points, 10_000);
        assert_eq!(params.seed_backing, Amount::from(1000));
    }

    #[test]
    fn tax_above_denominator_rejected() {
        let err = TokenConfig::from_toml_str("tax_rate_bps = 20000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn mismatched_seeds_rejected() {
        let err = TokenConfig::from_toml_str("seed_backing = 5\nseed_ledger = 6").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = TokenConfig::from_toml_str("tax_rate_bps = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "symbol = \"FILE\"\nbasis_points = 1000\ntax_rate_bps = 10").unwrap();
        let config = TokenConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.symbol, "FILE");
        assert_eq!(config.params().basis_points, 1000);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
