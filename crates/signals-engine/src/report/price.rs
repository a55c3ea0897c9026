//! Latest price snapshot

use crate::error::{EngineError, Result};
use crate::series::Series;
use crate::stats::{percent_change, round2};
use serde::Serialize;

/// Most recent bar with the change against the previous bar's close
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub timestamp: String,
    pub last_refreshed: String,
    pub latest_price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub previous_close: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
}

/// Build a [`PriceSnapshot`] from the two most recent bars
///
/// With a single bar the previous close is the latest close itself. Symbol and
/// last-refreshed time come from the series metadata when present; the latter
/// falls back to the latest bar's timestamp.
pub fn latest_price(series: &Series) -> Result<PriceSnapshot> {
    let latest = series.latest().ok_or(EngineError::InsufficientData {
        required: 1,
        actual: 0,
    })?;
    let previous_close = series.get(1).map_or(latest.close, |bar| bar.close);
    let meta = series.meta().cloned().unwrap_or_default();

    Ok(PriceSnapshot {
        symbol: meta.symbol,
        timestamp: latest.timestamp.clone(),
        last_refreshed: meta
            .last_refreshed
            .unwrap_or_else(|| latest.timestamp.clone()),
        latest_price: round2(latest.close),
        open: round2(latest.open),
        high: round2(latest.high),
        low: round2(latest.low),
        volume: latest.volume,
        previous_close: round2(previous_close),
        price_change: round2(latest.close - previous_close),
        price_change_percent: round2(percent_change(previous_close, latest.close)),
    })
}
