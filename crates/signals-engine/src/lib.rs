//! Technical and sentiment analytics over OHLCV bar series
//!
//! This crate derives trading signals from per-minute price bars and a few
//! static company-overview facts. It includes:
//!
//! - Moving averages, RSI and a simplified MACD
//! - Short-term trend classification with support and resistance
//! - A weighted multi-factor sentiment score in `[-100, 100]`
//! - Valuation, dividend and annual-statement ratios (profitability,
//!   liquidity, leverage, efficiency and growth)
//! - Report assemblers producing serializable, camelCase JSON values
//! - A file-backed loader for Alpha Vantage shaped JSON dumps
//! - Tools exposing the reports through a [`signals_tools::ToolRegistry`]
//!
//! # Ordering
//!
//! All calculations read series most-recent-first. [`Series`] is the only
//! carrier of bars into the engine, so that ordering is fixed once when the
//! series is built.
//!
//! # Example
//!
//! ```rust
//! use signals_engine::{Bar, Series, compute_trend};
//!
//! let bars = (0..12)
//!     .map(|i| {
//!         let close = 120.0 - f64::from(i);
//!         Bar::new(format!("2024-01-15 15:{:02}:00", 59 - i), close, close, close, close, 1_000)
//!     })
//!     .collect();
//! let series = Series::from_descending(bars);
//!
//! let report = compute_trend(&series, 50).unwrap();
//! assert_eq!(report.trend_analysis.trend_direction.as_str(), "Uptrend");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod fundamentals;
pub mod indicators;
pub mod overview;
pub mod report;
pub mod sentiment;
pub mod series;
pub mod stats;
pub mod tools;
pub mod trend;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use data::{DataLoader, FileDataLoader};
pub use error::{EngineError, Result};
pub use fundamentals::{Earnings, RatioSeries, Statement, StatementKind};
pub use overview::OverviewFacts;
pub use report::{
    IndicatorReport, PriceSnapshot, SentimentReport, TrendReport, compute_indicators,
    compute_sentiment, compute_trend, latest_price,
};
pub use sentiment::{SentimentAnalysis, SentimentScorer};
pub use series::{Bar, PriceColumns, Series, SeriesMeta};
pub use tools::register_market_tools;
pub use trend::{TrendAnalysis, TrendClassifier};
