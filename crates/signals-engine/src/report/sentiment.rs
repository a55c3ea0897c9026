//! Market sentiment report

use crate::error::Result;
use crate::sentiment::{
    Confidence, MomentumIndicator, PressureLevel, SentimentAnalysis, SentimentCategory,
    SentimentScorer, SubScores, VolumeSignal,
};
use crate::series::Series;
use crate::stats::round2;
use crate::trend::Volatility;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    pub overall_sentiment: SentimentCategory,
    pub sentiment_score: i32,
    pub confidence: Confidence,
    pub risk_level: Volatility,
    pub subscores: SubScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSignals {
    pub buying_pressure: PressureLevel,
    pub selling_pressure: PressureLevel,
    pub volume_signal: VolumeSignal,
    pub momentum_indicator: MomentumIndicator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentPriceMetrics {
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub price_action: String,
    pub up_periods: usize,
    pub down_periods: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMetrics {
    pub average_volume: u64,
    pub recent_volume: u64,
    pub volume_ratio: f64,
}

/// Sentiment report for one series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentReport {
    pub periods: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_timeframe: Option<String>,
    pub sentiment_analysis: SentimentSummary,
    pub market_signals: MarketSignals,
    pub price_metrics: SentimentPriceMetrics,
    pub volume_metrics: VolumeMetrics,
    pub recommendation: String,
    pub summary: String,
}

/// Score the most recent `lookback` bars and assemble a [`SentimentReport`]
pub fn compute_sentiment(series: &Series, lookback: usize) -> Result<SentimentReport> {
    let analysis = SentimentScorer::new(lookback).score(series)?;

    Ok(SentimentReport {
        periods: analysis.periods,
        analysis_timeframe: analysis.timeframe.clone(),
        sentiment_analysis: SentimentSummary {
            overall_sentiment: analysis.category,
            sentiment_score: analysis.score,
            confidence: analysis.confidence,
            risk_level: analysis.risk_level,
            subscores: analysis.subscores,
        },
        market_signals: MarketSignals {
            buying_pressure: analysis.buying_pressure,
            selling_pressure: analysis.selling_pressure,
            volume_signal: analysis.volume_signal,
            momentum_indicator: analysis.momentum_indicator,
        },
        price_metrics: SentimentPriceMetrics {
            current_price: round2(analysis.current_price),
            price_change: round2(analysis.current_price - analysis.start_price),
            price_change_percent: round2(analysis.price_change_percent),
            price_action: price_action(&analysis).to_string(),
            up_periods: analysis.up_periods,
            down_periods: analysis.down_periods,
        },
        volume_metrics: VolumeMetrics {
            average_volume: analysis.average_volume as u64,
            recent_volume: analysis.recent_volume as u64,
            volume_ratio: round2(analysis.volume_ratio),
        },
        recommendation: analysis.category.recommendation().to_string(),
        summary: summarize(&analysis),
    })
}

fn price_action(analysis: &SentimentAnalysis) -> &'static str {
    let change = analysis.price_change_percent;
    if analysis.up_periods > analysis.down_periods && change > 0.0 {
        "Consistent upward movement with positive momentum"
    } else if analysis.down_periods > analysis.up_periods && change < 0.0 {
        "Consistent downward movement with negative momentum"
    } else if change.abs() < 1.0 {
        "Sideways consolidation with no clear direction"
    } else {
        "Mixed signals with volatile price swings"
    }
}

fn volatility_impact(risk: Volatility) -> &'static str {
    match risk {
        Volatility::High => "High volatility indicates uncertainty",
        Volatility::Moderate => "Moderate volatility",
        Volatility::Low => "Low volatility indicates stability",
    }
}

fn summarize(analysis: &SentimentAnalysis) -> String {
    let change = analysis.price_change_percent;
    [
        format!(
            "{} sentiment with {} confidence.",
            analysis.category,
            analysis.confidence.as_str().to_lowercase()
        ),
        format!("Sentiment score: {}/100.", analysis.score),
        format!(
            "Price has {} by {:.2}% over the period.",
            if change > 0.0 { "increased" } else { "decreased" },
            change.abs()
        ),
        format!(
            "{} buying pressure vs {} selling pressure.",
            analysis.buying_pressure.as_str(),
            analysis.selling_pressure.as_str().to_lowercase()
        ),
        format!(
            "Volume indicates {}.",
            analysis.volume_signal.as_str().to_lowercase()
        ),
        format!("{}.", volatility_impact(analysis.risk_level)),
        format!("Risk level: {}.", analysis.risk_level),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;

    #[test]
    fn test_flat_report() {
        let bars = (0..15)
            .map(|i| Bar::new(format!("2024-01-15 15:{:02}:00", 59 - i), 50.0, 50.0, 50.0, 50.0, 700))
            .collect();
        let report = compute_sentiment(&Series::from_descending(bars), 30).unwrap();

        assert_eq!(report.periods, 15);
        assert_eq!(report.sentiment_analysis.sentiment_score, 0);
        assert_eq!(report.sentiment_analysis.overall_sentiment, SentimentCategory::Neutral);
        assert_eq!(report.recommendation, "Hold and wait for clearer signals");
        assert_eq!(
            report.price_metrics.price_action,
            "Sideways consolidation with no clear direction"
        );
        assert_eq!(report.volume_metrics.volume_ratio, 1.0);
        assert_eq!(
            report.analysis_timeframe.as_deref(),
            Some("2024-01-15 15:45:00 to 2024-01-15 15:59:00")
        );
        assert!(report.summary.starts_with("Neutral sentiment with low confidence. Sentiment score: 0/100."));
        assert!(report.summary.ends_with("Low volatility indicates stability. Risk level: Low."));
    }

    #[test]
    fn test_report_json_shape() {
        let bars = (0..12)
            .map(|i| {
                let c = 80.0 - f64::from(i);
                Bar::new(format!("t{i}"), c, c, c - 1.0, c, 100)
            })
            .collect();
        let report = compute_sentiment(&Series::from_descending(bars), 30).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["sentimentAnalysis"]["subscores"]["momentum"], 25);
        assert_eq!(json["marketSignals"]["momentumIndicator"], "Strong Positive");
        assert_eq!(json["marketSignals"]["buyingPressure"], "Strong");
        assert_eq!(json["priceMetrics"]["upPeriods"], 11);
        assert_eq!(
            json["priceMetrics"]["priceAction"],
            "Consistent upward movement with positive momentum"
        );
    }
}
