//! Data loader trait and the file-backed implementation

use super::alpha_vantage::{
    overview_fields, parse_earnings, parse_overview, parse_statement, parse_time_series,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::fundamentals::{Earnings, Statement, StatementKind};
use crate::overview::OverviewFacts;
use crate::series::Series;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File holding the intraday series inside a symbol directory
pub const TIME_SERIES_FILE: &str = "TIME_SERIES_INTRADAY.json";

/// File holding the company overview inside a symbol directory
pub const OVERVIEW_FILE: &str = "OVERVIEW.json";

/// File holding annual and quarterly reported EPS inside a symbol directory
pub const EARNINGS_FILE: &str = "EARNINGS.json";

/// Source of price series, overview facts and annual statements for a symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataLoader: Send + Sync {
    /// Load the bar series for `symbol`, most recent bar first
    async fn load_series(&self, symbol: &str) -> Result<Series>;

    /// Load the overview facts for `symbol`
    async fn load_overview(&self, symbol: &str) -> Result<OverviewFacts>;

    /// Load the full overview key/value bag for `symbol`
    async fn load_overview_fields(&self, symbol: &str) -> Result<Map<String, Value>>;

    /// Load one annual statement for `symbol`, most recent fiscal year first
    async fn load_statement(&self, symbol: &str, kind: StatementKind) -> Result<Statement>;

    /// Load reported earnings for `symbol`
    async fn load_earnings(&self, symbol: &str) -> Result<Earnings>;
}

/// Reads Alpha Vantage JSON dumps laid out as `<data_dir>/<SYMBOL>/<FILE>.json`
#[derive(Debug, Clone)]
pub struct FileDataLoader {
    root: PathBuf,
    series_key: String,
}

impl FileDataLoader {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            root: config.data_dir.clone(),
            series_key: config.series_key(),
        }
    }

    /// Root directory this loader reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, symbol: &str, file: &str) -> PathBuf {
        self.root.join(symbol.to_uppercase()).join(file)
    }

    async fn read_json(&self, symbol: &str, file: &str) -> Result<Value> {
        let path = self.path_for(symbol, file);
        tracing::debug!(symbol, path = %path.display(), "Reading market data");

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::DataUnavailable {
                    symbol: symbol.to_uppercase(),
                    reason: format!("no data file at {}", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl DataLoader for FileDataLoader {
    async fn load_series(&self, symbol: &str) -> Result<Series> {
        let payload = self.read_json(symbol, TIME_SERIES_FILE).await?;
        parse_time_series(&payload, &self.series_key, &symbol.to_uppercase())
    }

    async fn load_overview(&self, symbol: &str) -> Result<OverviewFacts> {
        let payload = self.read_json(symbol, OVERVIEW_FILE).await?;
        parse_overview(&payload, &symbol.to_uppercase())
    }

    async fn load_overview_fields(&self, symbol: &str) -> Result<Map<String, Value>> {
        let payload = self.read_json(symbol, OVERVIEW_FILE).await?;
        overview_fields(&payload, &symbol.to_uppercase()).cloned()
    }

    async fn load_statement(&self, symbol: &str, kind: StatementKind) -> Result<Statement> {
        let payload = self.read_json(symbol, kind.file_name()).await?;
        parse_statement(&payload, &symbol.to_uppercase())
    }

    async fn load_earnings(&self, symbol: &str) -> Result<Earnings> {
        let payload = self.read_json(symbol, EARNINGS_FILE).await?;
        parse_earnings(&payload, &symbol.to_uppercase())
    }
}
