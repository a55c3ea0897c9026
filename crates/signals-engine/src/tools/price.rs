//! Tool returning the latest price snapshot

use crate::data::DataLoader;
use crate::report::latest_price;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use signals_tools::{Result as ToolResult, Tool};
use std::sync::Arc;

/// Latest bar and change against the previous close
pub struct LatestPriceTool {
    loader: Arc<dyn DataLoader>,
}

#[derive(Debug, Deserialize)]
struct PriceParams {}

impl LatestPriceTool {
    pub fn new(loader: Arc<dyn DataLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Tool for LatestPriceTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, PriceParams {}) = super::parse_params(params)?;
        tracing::debug!(%company, "Fetching latest price");

        let outcome = self
            .loader
            .load_series(&company)
            .await
            .and_then(|series| latest_price(&series))
            .map(|mut snapshot| {
                snapshot.symbol.get_or_insert_with(|| company.clone());
                snapshot
            });
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        "get_latest_price"
    }

    fn description(&self) -> &str {
        "Get the latest price bar for a company with the change against the previous close."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g. IBM)"
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
    use crate::error::EngineError;
    use crate::tools::fixtures;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_latest_price() {
        let mut loader = MockDataLoader::new();
        loader
            .expect_load_series()
            .with(eq("IBM"))
            .times(1)
            .returning(|_| Ok(fixtures::series(&[145.32, 144.0])));

        let tool = LatestPriceTool::new(Arc::new(loader));
        let value = tool.execute(json!({"company": "ibm"})).await.unwrap();

        assert_eq!(value["company"], "IBM");
        assert_eq!(value["latestPrice"], 145.32);
        assert_eq!(value["previousClose"], 144.0);
        assert_eq!(value["priceChange"], 1.32);
        assert_eq!(value["timestamp"], "2024-01-15 15:59:00");
        assert_eq!(value["symbol"], "IBM");
        assert_eq!(value["lastRefreshed"], "2024-01-15 15:59:00");
    }

    #[tokio::test]
    async fn test_unknown_company_is_structured_error() {
        let mut loader = MockDataLoader::new();
        loader.expect_load_series().returning(|symbol| {
            Err(EngineError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no data file".to_string(),
            })
        });

        let tool = LatestPriceTool::new(Arc::new(loader));
        let value = tool.execute(json!({"company": "NOPE"})).await.unwrap();

        assert_eq!(value["company"], "NOPE");
        assert_eq!(value["errorKind"], "data_unavailable");
        assert!(value.get("latestPrice").is_none());
    }

    #[test]
    fn test_schema_requires_company() {
        let tool = LatestPriceTool::new(Arc::new(MockDataLoader::new()));
        assert_eq!(tool.input_schema()["required"][0], "company");
    }
}
