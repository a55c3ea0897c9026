//! Tool summarizing the short-term price trend

use crate::config::EngineConfig;
use crate::data::DataLoader;
use crate::report::compute_trend;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use signals_tools::{Result as ToolResult, Tool};
use std::sync::Arc;

/// Trend direction, support/resistance and volume behaviour over recent bars
pub struct PriceTrendTool {
    loader: Arc<dyn DataLoader>,
    config: Arc<EngineConfig>,
}

#[derive(Debug, Deserialize)]
struct TrendParams {
    #[serde(default)]
    lookback_periods: Option<usize>,
}

impl PriceTrendTool {
    pub fn new(loader: Arc<dyn DataLoader>, config: Arc<EngineConfig>) -> Self {
        Self { loader, config }
    }
}

#[async_trait]
impl Tool for PriceTrendTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, params): (String, TrendParams) = super::parse_params(params)?;
        let lookback = params.lookback_periods.unwrap_or(self.config.trend_lookback);
        tracing::debug!(%company, lookback, "Summarizing price trend");

        let outcome = self
            .loader
            .load_series(&company)
            .await
            .and_then(|series| compute_trend(&series, lookback));
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        "get_price_trend_summary"
    }

    fn description(&self) -> &str {
        "Classify the recent price trend of a company: direction, strength, \
         support and resistance, volatility, momentum and volume trend."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "lookback_periods": {
                    "type": "integer",
                    "description": "Number of most recent bars to analyze (at least 10)",
                    "default": self.config.trend_lookback
                }
            },
            "required": ["company"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockDataLoader;
    use crate::tools::fixtures;

    #[tokio::test]
    async fn test_uptrend_summary() {
        let mut loader = MockDataLoader::new();
        loader.expect_load_series().returning(|_| {
            let closes: Vec<f64> = (0..11).map(|i| 110.0 - 2.0 * f64::from(i)).collect();
            Ok(fixtures::series(&closes))
        });

        let tool = PriceTrendTool::new(Arc::new(loader), Arc::new(EngineConfig::default()));
        let value = tool
            .execute(json!({"company": "msft", "lookback_periods": 20}))
            .await
            .unwrap();

        assert_eq!(value["company"], "MSFT");
        assert_eq!(value["periods"], 11);
        assert_eq!(value["trendAnalysis"]["trendDirection"], "Uptrend");
    }

    #[tokio::test]
    async fn test_short_history_is_structured_error() {
        let mut loader = MockDataLoader::new();
        loader
            .expect_load_series()
            .returning(|_| Ok(fixtures::series(&[10.0, 9.0, 8.0])));

        let tool = PriceTrendTool::new(Arc::new(loader), Arc::new(EngineConfig::default()));
        let value = tool.execute(json!({"company": "IBM"})).await.unwrap();

        assert_eq!(value["errorKind"], "insufficient_data");
        assert_eq!(
            value["error"],
            "Insufficient data. Need at least 10 periods, got 3"
        );
    }

    #[tokio::test]
    async fn test_wrong_parameter_type() {
        let tool = PriceTrendTool::new(
            Arc::new(MockDataLoader::new()),
            Arc::new(EngineConfig::default()),
        );
        let result = tool
            .execute(json!({"company": "IBM", "lookback_periods": "many"}))
            .await;
        assert!(matches!(result, Err(signals_tools::Error::InvalidParameters(_))));
    }
}
