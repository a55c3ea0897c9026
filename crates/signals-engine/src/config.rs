//! Configuration for market signal operations

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "MARKET_DATA_DIR";

/// Smallest window the trend and sentiment algorithms accept
pub const MIN_ANALYSIS_PERIODS: usize = 10;

/// Configuration for market signal operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Root directory holding one sub-directory of JSON files per symbol
    pub data_dir: PathBuf,

    /// Default period for RSI and the short moving averages
    pub rsi_period: usize,

    /// Default lookback window for trend classification
    pub trend_lookback: usize,

    /// Default lookback window for sentiment scoring
    pub sentiment_lookback: usize,

    /// Bar interval of the intraday series ("1min", "5min", ...)
    pub interval: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            rsi_period: 14,
            trend_lookback: 50,
            sentiment_lookback: 30,
            interval: "1min".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the data directory from `MARKET_DATA_DIR` when set
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.rsi_period == 0 {
            return Err(EngineError::ConfigError(
                "rsi_period must be greater than 0".to_string(),
            ));
        }

        for (name, lookback) in [
            ("trend_lookback", self.trend_lookback),
            ("sentiment_lookback", self.sentiment_lookback),
        ] {
            if lookback < MIN_ANALYSIS_PERIODS {
                return Err(EngineError::ConfigError(format!(
                    "{name} must be at least {MIN_ANALYSIS_PERIODS}"
                )));
            }
        }

        if self.interval.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "interval must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Key of the intraday series object in Alpha Vantage payloads
    pub fn series_key(&self) -> String {
        format!("Time Series ({})", self.interval)
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    data_dir: Option<PathBuf>,
    rsi_period: Option<usize>,
    trend_lookback: Option<usize>,
    sentiment_lookback: Option<usize>,
    interval: Option<String>,
}

impl EngineConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the default RSI period
    pub fn rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = Some(period);
        self
    }

    /// Set the default trend lookback
    pub fn trend_lookback(mut self, lookback: usize) -> Self {
        self.trend_lookback = Some(lookback);
        self
    }

    /// Set the default sentiment lookback
    pub fn sentiment_lookback(mut self, lookback: usize) -> Self {
        self.sentiment_lookback = Some(lookback);
        self
    }

    /// Set the bar interval
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            rsi_period: self.rsi_period.unwrap_or(defaults.rsi_period),
            trend_lookback: self.trend_lookback.unwrap_or(defaults.trend_lookback),
            sentiment_lookback: self
                .sentiment_lookback
                .unwrap_or(defaults.sentiment_lookback),
            interval: self.interval.unwrap_or(defaults.interval),
        };

        config.validate()?;
        Ok(config)
    }
}
