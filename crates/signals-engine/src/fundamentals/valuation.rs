//! Valuation multiples and dividend figures read from the company overview

use crate::data::fields::{number_or, text_or};
use crate::error::Result;
use crate::stats::{ratio_or, round2};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pricing multiples as reported in the overview; absent values read as `0.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetrics {
    pub pe_ratio: f64,
    pub price_to_book: f64,
    pub peg_ratio: f64,
    pub ev_to_ebitda: f64,
    pub price_to_sales: f64,
    pub trailing_pe: f64,
    pub forward_pe: f64,
    pub market_cap: f64,
}

/// Dividend yield and payout derived from the overview
///
/// `dividend_yield` and `payout_ratio` are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendInfo {
    pub dividend_per_share: f64,
    pub dividend_yield: f64,
    pub payout_ratio: f64,
    pub ex_dividend_date: String,
    pub dividend_payment_date: String,
    pub current_stock_price: f64,
}

const NOT_AVAILABLE: &str = "N/A";

pub fn valuation_metrics(overview: &Map<String, Value>) -> Result<ValuationMetrics> {
    let field = |key: &str| number_or(overview, key, 0.0);
    Ok(ValuationMetrics {
        pe_ratio: field("PERatio")?,
        price_to_book: field("PriceToBookRatio")?,
        peg_ratio: field("PEGRatio")?,
        ev_to_ebitda: field("EVToEBITDA")?,
        price_to_sales: field("PriceToSalesRatioTTM")?,
        trailing_pe: field("TrailingPE")?,
        forward_pe: field("ForwardPE")?,
        market_cap: field("MarketCapitalization")?,
    })
}

/// Dividend figures with the share price implied by market cap over shares outstanding
///
/// Yield is `0.0` without a positive price and payout is `0.0` without a
/// positive EPS.
pub fn dividend_info(overview: &Map<String, Value>) -> Result<DividendInfo> {
    let dividend_per_share = number_or(overview, "DividendPerShare", 0.0)?;
    let market_cap = number_or(overview, "MarketCapitalization", 0.0)?;
    let shares_outstanding = number_or(overview, "SharesOutstanding", 1.0)?;
    let eps = number_or(overview, "EPS", 0.0)?;

    let price = ratio_or(market_cap, shares_outstanding, 0.0);
    let dividend_yield = round2(ratio_or(dividend_per_share, price, 0.0) * 100.0);
    let payout_ratio = round2(ratio_or(dividend_per_share, eps, 0.0) * 100.0);

    Ok(DividendInfo {
        dividend_per_share,
        dividend_yield,
        payout_ratio,
        ex_dividend_date: text_or(overview, "ExDividendDate", NOT_AVAILABLE),
        dividend_payment_date: text_or(overview, "DividendDate", NOT_AVAILABLE),
        current_stock_price: round2(price),
    })
}
