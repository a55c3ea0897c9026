//! Fundamental analysis over company overviews and annual statements
//!
//! Valuation and dividend figures come straight from the overview bag. The
//! ratio families read annual balance sheets, income statements and
//! earnings, most recent fiscal year first, pairing statements by position.

pub mod ratios;
pub mod valuation;

pub use ratios::{
    EfficiencyYear, GrowthYear, LeverageYear, LiquidityYear, ProfitabilityYear, RatioSeries, efficiency_ratios, growth_metrics, leverage_ratios, liquidity_ratios,
    profitability_ratios,
};
pub use valuation::{DividendInfo, ValuationMetrics, dividend_info, valuation_metrics};

use crate::data::fields::{number_or, required_number};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Annual statement files available per symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
}

impl StatementKind {
    /// File holding this statement inside a symbol directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BALANCE_SHEET.json",
            Self::IncomeStatement => "INCOME_STATEMENT.json",
        }
    }
}

/// One fiscal year of a statement, keyed by Alpha Vantage field names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualReport {
    pub fiscal_date_ending: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AnnualReport {
    /// Numeric field, or `default` when the report leaves it out
    pub fn number_or(&self, key: &str, default: f64) -> Result<f64> {
        number_or(&self.fields, key, default)
    }

    /// Numeric field that must be present
    pub fn number(&self, key: &str) -> Result<f64> {
        required_number(&self.fields, key)
    }
}

/// Annual reports of one statement, most recent fiscal year first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub annual_reports: Vec<AnnualReport>,
}

/// Annual reported EPS, most recent fiscal year first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earnings {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub annual_earnings: Vec<AnnualReport>,
}

impl Earnings {
    /// Earnings row for the fiscal year ending on `fiscal_date_ending`
    pub fn for_fiscal_year(&self, fiscal_date_ending: &str) -> Option<&AnnualReport> {
        self.annual_earnings
            .iter()
            .find(|row| row.fiscal_date_ending == fiscal_date_ending)
    }
}
