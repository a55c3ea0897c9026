//! Tool computing RSI, MACD, SMA and EMA with overview context

use crate::config::EngineConfig;
use crate::data::DataLoader;
use crate::report::compute_indicators;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use signals_tools::{Error as ToolError, Result as ToolResult, Tool};
use std::sync::Arc;

/// Tool for calculating technical indicators
pub struct TechnicalIndicatorTool {
    loader: Arc<dyn DataLoader>,
    config: Arc<EngineConfig>,
}

#[derive(Debug, Deserialize)]
struct TechnicalParams {
    #[serde(default)]
    period: Option<usize>,
}

impl TechnicalIndicatorTool {
    pub fn new(loader: Arc<dyn DataLoader>, config: Arc<EngineConfig>) -> Self {
        Self { loader, config }
    }
}

#[async_trait]
impl Tool for TechnicalIndicatorTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, params): (String, TechnicalParams) = super::parse_params(params)?;
        let period = params.period.unwrap_or(self.config.rsi_period);
        if period == 0 {
            return Err(ToolError::InvalidParameters(
                "`period` must be at least 1".to_string(),
            ));
        }
        tracing::debug!(%company, period, "Computing technical indicators");

        let outcome = async {
            let series = self.loader.load_series(&company).await?;
            let overview = self.loader.load_overview(&company).await?;
            compute_indicators(&series, &overview, period)
        }
        .await;
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        "get_technical_indicators"
    }

    fn description(&self) -> &str {
        "Calculate RSI, MACD, SMA and EMA for a company's recent price bars, \
         combined with beta and 52-week range from the company overview."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "period": {
                    "type": "integer",
                    "description": "Period for RSI and the short moving averages",
                    "minimum": 1,
                    "default": self.config.rsi_period
                }
            },
            "required": ["company"]
        })
    }
}
