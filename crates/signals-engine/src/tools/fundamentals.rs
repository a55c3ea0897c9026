//! Tools over company overviews and annual statements

use crate::data::DataLoader;
use crate::error::Result as EngineResult;
use crate::fundamentals::{
    StatementKind, dividend_info, efficiency_ratios, growth_metrics, leverage_ratios,
    liquidity_ratios, profitability_ratios, valuation_metrics,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use signals_tools::{Error as ToolError, Result as ToolResult, Tool};
use std::sync::Arc;

/// Fiscal years reported when `year_range` is omitted
pub const DEFAULT_YEAR_RANGE: usize = 1;

#[derive(Debug, Deserialize)]
struct CompanyParams {}

#[derive(Debug, Deserialize)]
struct YearRangeParams {
    #[serde(default)]
    year_range: Option<usize>,
}

fn company_schema() -> Value {
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

/// P/E, P/B, PEG, EV/EBITDA and related multiples from the overview
pub struct ValuationTool {
    loader: Arc<dyn DataLoader>,
}

impl ValuationTool {
    pub fn new(loader: Arc<dyn DataLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Tool for ValuationTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, CompanyParams {}) = super::parse_params(params)?;
        tracing::debug!(%company, "Reading valuation multiples");

        let outcome = self
            .loader
            .load_overview_fields(&company)
            .await
            .and_then(|overview| valuation_metrics(&overview));
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        "get_valuation_metrics"
    }

    fn description(&self) -> &str {
        "Get valuation multiples for a company: P/E, P/B, PEG, EV/EBITDA, \
         price to sales, trailing and forward P/E, and market capitalization."
    }

    fn input_schema(&self) -> Value {
        company_schema()
    }
}

/// Dividend yield, payout ratio and dividend dates from the overview
pub struct DividendTool {
    loader: Arc<dyn DataLoader>,
}

impl DividendTool {
    pub fn new(loader: Arc<dyn DataLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Tool for DividendTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, CompanyParams {}) = super::parse_params(params)?;
        tracing::debug!(%company, "Reading dividend figures");

        let outcome = self
            .loader
            .load_overview_fields(&company)
            .await
            .and_then(|overview| dividend_info(&overview));
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        "get_dividend_info"
    }

    fn description(&self) -> &str {
        "Get dividend per share, dividend yield and payout ratio in percent, \
         ex-dividend and payment dates, and the implied share price."
    }

    fn input_schema(&self) -> Value {
        company_schema()
    }
}

/// Ratio family computed from annual statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    Profitability,
    Liquidity,
    Leverage,
    Efficiency,
    Growth,
}

impl RatioKind {
    pub const ALL: [Self; 5] = [
        Self::Profitability,
        Self::Liquidity,
        Self::Leverage,
        Self::Efficiency,
        Self::Growth,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Profitability => "get_profitability_ratios",
            Self::Liquidity => "get_liquidity_ratios",
            Self::Leverage => "get_leverage_ratios",
            Self::Efficiency => "get_efficiency_ratios",
            Self::Growth => "get_growth_metrics",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Profitability => {
                "Gross, operating and net margins with return on equity and assets, in percent, per fiscal year."
            }
            Self::Liquidity => "Current, quick and cash ratios per fiscal year.",
            Self::Leverage => "Debt to equity, interest coverage and debt to EBITDA per fiscal year.",
            Self::Efficiency => {
                "Inventory, asset and receivable turnover against average balances; needs two fiscal years."
            }
            Self::Growth => {
                "Year-over-year revenue, EPS and operating income growth in percent; needs two fiscal years."
            }
        }
    }
}

/// One [`RatioKind`] exposed as a tool taking `company` and `year_range`
pub struct FinancialRatioTool {
    loader: Arc<dyn DataLoader>,
    kind: RatioKind,
}

impl FinancialRatioTool {
    pub fn new(loader: Arc<dyn DataLoader>, kind: RatioKind) -> Self {
        Self { loader, kind }
    }

    async fn report(&self, company: &str, year_range: usize) -> EngineResult<Value> {
        let loader = &self.loader;
        let value = match self.kind {
            RatioKind::Profitability => {
                let (income, balance) = tokio::try_join!(
                    loader.load_statement(company, StatementKind::IncomeStatement),
                    loader.load_statement(company, StatementKind::BalanceSheet),
                )?;
                serde_json::to_value(profitability_ratios(&income, &balance, year_range)?)?
            }
            RatioKind::Liquidity => {
                let balance = loader.load_statement(company, StatementKind::BalanceSheet).await?;
                serde_json::to_value(liquidity_ratios(&balance, year_range)?)?
            }
            RatioKind::Leverage => {
                let (balance, income) = tokio::try_join!(
                    loader.load_statement(company, StatementKind::BalanceSheet),
                    loader.load_statement(company, StatementKind::IncomeStatement),
                )?;
                serde_json::to_value(leverage_ratios(&balance, &income, year_range)?)?
            }
            RatioKind::Efficiency => {
                let (balance, income) = tokio::try_join!(
                    loader.load_statement(company, StatementKind::BalanceSheet),
                    loader.load_statement(company, StatementKind::IncomeStatement),
                )?;
                serde_json::to_value(efficiency_ratios(&balance, &income, year_range)?)?
            }
            RatioKind::Growth => {
                let (income, earnings) = tokio::try_join!(
                    loader.load_statement(company, StatementKind::IncomeStatement),
                    loader.load_earnings(company),
                )?;
                serde_json::to_value(growth_metrics(&income, &earnings, year_range)?)?
            }
        };
        Ok(value)
    }
}

#[async_trait]
impl Tool for FinancialRatioTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let (company, params): (String, YearRangeParams) = super::parse_params(params)?;
        let year_range = params.year_range.unwrap_or(DEFAULT_YEAR_RANGE);
        if year_range == 0 {
            return Err(ToolError::InvalidParameters(
                "`year_range` must be at least 1".into(),
            ));
        }
        tracing::debug!(%company, kind = ?self.kind, year_range, "Computing financial ratios");

        let outcome = self.report(&company, year_range).await;
        super::respond(&company, outcome)
    }

    fn name(&self) -> &str {
        self.kind.tool_name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g. IBM)"
                },
                "year_range": {
                    "type": "integer",
                    "description": "Number of most recent fiscal years to report",
                    "minimum": 1,
                    "default": DEFAULT_YEAR_RANGE
                }
            },
            "required": ["company"]
        })
    }
}
