//! Price trend summary report

use crate::error::Result;
use crate::series::Series;
use crate::stats::round2;
use crate::trend::{
    PricePattern, TrendAnalysis, TrendClassifier, TrendDirection, TrendMomentum, TrendStrength,
    Volatility,
};
use serde::Serialize;

/// Distance (in percent of the current price) considered "near" a level
const NEAR_LEVEL_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub trend_direction: TrendDirection,
    pub trend_strength: TrendStrength,
    pub momentum: TrendMomentum,
    pub recent_pattern: PricePattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPriceMetrics {
    pub current_price: f64,
    pub start_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub average_price: f64,
    pub volatility: Volatility,
    pub standard_deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResistance {
    pub support_level: f64,
    pub resistance_level: f64,
    pub distance_from_support: f64,
    pub distance_from_resistance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeAnalysis {
    pub average_volume: u64,
    pub recent_volume: u64,
    pub volume_trend: String,
}

/// Trend report for one series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub periods: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_timeframe: Option<String>,
    pub trend_analysis: TrendSummary,
    pub price_metrics: TrendPriceMetrics,
    pub support_resistance: SupportResistance,
    pub volume_analysis: VolumeAnalysis,
    pub summary: String,
}

/// Classify the most recent `lookback` bars and assemble a [`TrendReport`]
pub fn compute_trend(series: &Series, lookback: usize) -> Result<TrendReport> {
    let analysis = TrendClassifier::new(lookback).classify(series)?;
    let summary = summarize(&analysis);

    Ok(TrendReport {
        periods: analysis.periods,
        analysis_timeframe: analysis.timeframe.clone(),
        trend_analysis: TrendSummary {
            trend_direction: analysis.direction,
            trend_strength: analysis.strength,
            momentum: analysis.momentum,
            recent_pattern: analysis.pattern,
        },
        price_metrics: TrendPriceMetrics {
            current_price: round2(analysis.current_price),
            start_price: round2(analysis.start_price),
            price_change: round2(analysis.price_change),
            price_change_percent: round2(analysis.price_change_percent),
            average_price: round2(analysis.average_price),
            volatility: analysis.volatility,
            standard_deviation: round2(analysis.standard_deviation),
        },
        support_resistance: SupportResistance {
            support_level: round2(analysis.support),
            resistance_level: round2(analysis.resistance),
            distance_from_support: round2(analysis.distance_from_support),
            distance_from_resistance: round2(analysis.distance_from_resistance),
        },
        volume_analysis: VolumeAnalysis {
            average_volume: analysis.average_volume as u64,
            recent_volume: analysis.recent_volume as u64,
            volume_trend: analysis.volume_trend.describe().to_string(),
        },
        summary,
    })
}

fn summarize(analysis: &TrendAnalysis) -> String {
    let mut parts = vec![
        format!(
            "{} {} with {} momentum.",
            analysis.strength,
            analysis.direction.as_str().to_lowercase(),
            analysis.momentum.as_str().to_lowercase()
        ),
        format!(
            "Price has {} {:.2}% over the period.",
            if analysis.price_change > 0.0 { "gained" } else { "lost" },
            analysis.price_change_percent.abs()
        ),
        format!(
            "Volatility is {}.",
            analysis.volatility.as_str().to_lowercase()
        ),
        format!(
            "Trading volume is {}.",
            analysis.volume_trend.describe().to_lowercase()
        ),
    ];

    if analysis.distance_from_support < NEAR_LEVEL_PERCENT {
        parts.push(format!(
            "Price is near support level at ${:.2}.",
            analysis.support
        ));
    } else if analysis.distance_from_resistance < NEAR_LEVEL_PERCENT {
        parts.push(format!(
            "Price is near resistance level at ${:.2}.",
            analysis.resistance
        ));
    }

    parts.join(" ")
}
