//! Environment-driven CLI configuration.

use caufi_cart::DEFAULT_LOW_STOCK_THRESHOLD;
use caufi_observability::LogFormat;
use serde::Serialize;
use thiserror::Error;

pub const ENV_LOG_FORMAT: &str = "CAUFI_LOG_FORMAT";
pub const ENV_CURRENCY: &str = "CAUFI_CURRENCY";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "CAUFI_LOW_STOCK_THRESHOLD";

pub const DEFAULT_CURRENCY: &str = "IDR";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CAUFI_LOG_FORMAT: {0}")]
    LogFormat(#[from] caufi_observability::ParseLogFormatError),
    #[error("CAUFI_CURRENCY must be a 3-letter currency code, got `{0}`")]
    Currency(String),
    #[error("CAUFI_LOW_STOCK_THRESHOLD must be a non-negative integer, got `{0}`")]
    LowStockThreshold(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdpConfig {
    pub currency: String,
    pub low_stock_threshold: i64,
    pub log_format: LogFormat,
}

impl Default for PdpConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            log_format: LogFormat::default(),
        }
    }
}

impl PdpConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank keys use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }

        if let Some(raw) = get(ENV_CURRENCY) {
            let code = raw.trim();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::Currency(raw));
            }
            config.currency = code.to_ascii_uppercase();
        }

        if let Some(raw) = get(ENV_LOW_STOCK_THRESHOLD) {
            config.low_stock_threshold = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or(ConfigError::LowStockThreshold(raw))?;
        }

        Ok(config)
    }
}
