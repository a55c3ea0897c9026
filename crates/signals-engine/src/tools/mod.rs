//! Market signal and fundamentals tools exposed through the tool registry
//!
//! Every tool takes `{"company": "<SYMBOL>", ...}` and answers with a JSON
//! object carrying the upper-cased `company` next to the report. Engine
//! failures (unknown symbol, short history, malformed files) are answered as
//! `{"company", "error", "errorKind"}` rather than failing the call; only
//! malformed parameters surface as [`signals_tools::Error::InvalidParameters`].

pub mod fundamentals;
pub mod price;
pub mod sentiment;
pub mod technical;
pub mod trend;

pub use fundamentals::{DividendTool, FinancialRatioTool, RatioKind, ValuationTool};
pub use price::LatestPriceTool;
pub use sentiment::MarketSentimentTool;
pub use technical::TechnicalIndicatorTool;
pub use trend::PriceTrendTool;

use crate::config::EngineConfig;
use crate::data::DataLoader;
use crate::error::EngineError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use signals_tools::{Error as ToolError, Result as ToolResult, ToolRegistry};
use std::sync::Arc;

/// Register the price, fundamentals and ratio tools sharing one loader and configuration
pub fn register_market_tools(
    registry: &ToolRegistry,
    loader: Arc<dyn DataLoader>,
    config: Arc<EngineConfig>,
) {
    registry.register(Arc::new(LatestPriceTool::new(loader.clone())));
    registry.register(Arc::new(TechnicalIndicatorTool::new(
        loader.clone(),
        config.clone(),
    )));
    registry.register(Arc::new(PriceTrendTool::new(loader.clone(), config.clone())));
    registry.register(Arc::new(MarketSentimentTool::new(loader.clone(), config)));

    registry.register(Arc::new(ValuationTool::new(loader.clone())));
    registry.register(Arc::new(DividendTool::new(loader.clone())));
    for kind in RatioKind::ALL {
        registry.register(Arc::new(FinancialRatioTool::new(loader.clone(), kind)));
    }
}

/// Deserialize tool parameters and normalize the company symbol
pub(crate) fn parse_params<T>(params: Value) -> ToolResult<(String, T)>
where
    T: DeserializeOwned,
{
    let company = params
        .get("company")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|company| !company.is_empty())
        .ok_or_else(|| ToolError::InvalidParameters("`company` must be a non-empty string".into()))?
        .to_uppercase();

    let parsed = serde_json::from_value(params)
        .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
    Ok((company, parsed))
}

/// Turn an engine outcome into the tool's JSON answer
pub(crate) fn respond<R: Serialize>(
    company: &str,
    outcome: Result<R, EngineError>,
) -> ToolResult<Value> {
    let report = match outcome {
        Ok(report) => report,
        Err(err) => return Ok(error_result(company, &err)),
    };

    let mut value = serde_json::to_value(report)
        .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.insert("company".to_string(), Value::String(company.to_string()));
    }
    Ok(value)
}

fn error_result(company: &str, err: &EngineError) -> Value {
    tracing::warn!(company, kind = err.kind(), error = %err, "Market tool returned an error result");
    json!({
        "company": company,
        "error": err.to_string(),
        "errorKind": err.kind(),
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockDataLoader;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Empty {}

    #[test]
    fn test_parse_params_upper_cases_company() {
        let (company, _): (String, Empty) = parse_params(json!({"company": " ibm "})).unwrap();
        assert_eq!(company, "IBM");
    }

    #[test]
    fn test_parse_params_rejects_missing_company() {
        let err = parse_params::<Empty>(json!({"period": 3})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));

        let err = parse_params::<Empty>(json!({"company": ""})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn test_error_result_shape() {
        let value = respond::<Value>(
            "IBM",
            Err(EngineError::InsufficientData {
                required: 10,
                actual: 3,
            }),
        )
        .unwrap();

        assert_eq!(value["company"], "IBM");
        assert_eq!(value["errorKind"], "insufficient_data");
        assert_eq!(
            value["error"],
            "Insufficient data. Need at least 10 periods, got 3"
        );
    }

    #[test]
    fn test_register_market_tools() {
        let registry = ToolRegistry::new();
        register_market_tools(
            &registry,
            Arc::new(MockDataLoader::new()),
            Arc::new(EngineConfig::default()),
        );

        assert_eq!(
            registry.names(),
            [
                "get_dividend_info",
                "get_efficiency_ratios",
                "get_growth_metrics",
                "get_latest_price",
                "get_leverage_ratios",
                "get_liquidity_ratios",
                "get_market_sentiment",
                "get_price_trend_summary",
                "get_profitability_ratios",
                "get_technical_indicators",
                "get_valuation_metrics",
            ]
        );
    }
}
