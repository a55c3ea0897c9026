//! Behavioural properties of the analytics engine over in-memory series

use signals_engine::indicators::{ema, macd, rsi, sma};
use signals_engine::{
    Bar, EngineError, OverviewFacts, Series, compute_indicators, compute_sentiment, compute_trend,
};

/// Most-recent-first closes with high = low = close and constant volume
fn flat_bars(closes: &[f64], volume: u64) -> Series {
    Series::from_descending(
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(format!("2024-01-15 15:{:02}:00", 59 - i), c, c, c, c, volume))
            .collect(),
    )
}

fn overview() -> OverviewFacts {
    OverviewFacts {
        beta: 1.1,
        week52_high: 150.0,
        week52_low: 80.0,
        sma50: None,
        sma200: None,
    }
}

#[test]
fn rsi_stays_bounded() {
    let inputs: [&[f64]; 4] = [
        &[1.0],
        &[5.0, 4.0, 6.0, 3.0, 7.0, 2.0, 8.0, 1.0, 9.0, 0.5, 10.0, 0.1, 11.0, 0.0, 12.0, 3.0],
        &[100.0; 20],
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0],
    ];
    for values in inputs {
        let value = rsi(values, 14);
        assert!((0.0..=100.0).contains(&value), "rsi {value} out of range");
    }
}

#[test]
fn rsi_without_losses_is_100_and_short_input_is_neutral() {
    let rising: Vec<f64> = (0..15).map(|i| 50.0 - f64::from(i)).collect();
    assert_eq!(rsi(&rising, 14), 100.0);
    assert_eq!(rsi(&rising[..14], 14), 50.0);
}

#[test]
fn sma_of_one_is_latest_value() {
    assert_eq!(sma(&[42.5, 10.0, 3.0], 1), 42.5);
    assert_eq!(sma(&[7.0], 1), 7.0);
}

#[test]
fn ema_equals_sma_when_length_matches_period() {
    let values = [12.0, 11.5, 13.25, 10.0, 9.75];
    assert_eq!(ema(&values, 5), sma(&values, 5));
}

#[test]
fn macd_is_zero_below_26_values() {
    let values: Vec<f64> = (0..25).map(f64::from).collect();
    let result = macd(&values);
    assert_eq!((result.macd, result.signal, result.histogram), (0.0, 0.0, 0.0));
}

#[test]
fn rising_closes_classify_as_uptrend() {
    let closes: Vec<f64> = (0..11).map(|i| 110.0 - 2.0 * f64::from(i)).collect();
    let report = compute_trend(&flat_bars(&closes, 1000), 50).unwrap();
    assert_eq!(report.trend_analysis.trend_direction.as_str(), "Uptrend");
}

#[test]
fn declining_closes_classify_as_downtrend_with_levels() {
    // most recent close is the lowest
    let closes: Vec<f64> = (100..=112).map(f64::from).collect();
    let report = compute_trend(&flat_bars(&closes, 1000), 50).unwrap();

    assert_eq!(report.periods, 13);
    assert_eq!(report.trend_analysis.trend_direction.as_str(), "Downtrend");
    assert_eq!(report.support_resistance.support_level, 100.0);
    assert_eq!(report.support_resistance.resistance_level, 112.0);
}

#[test]
fn flat_series_scores_neutral_sentiment() {
    let report = compute_sentiment(&flat_bars(&[75.0; 12], 500), 30).unwrap();
    assert_eq!(report.sentiment_analysis.sentiment_score, 0);
    assert_eq!(report.sentiment_analysis.overall_sentiment.as_str(), "Neutral");
}

#[test]
fn sentiment_score_stays_bounded() {
    let rally: Vec<f64> = (0..30).map(|i| 200.0 - 3.0 * f64::from(i)).collect();
    let crash: Vec<f64> = rally.iter().rev().copied().collect();
    let jagged: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 90.0 } else { 110.0 }).collect();

    for closes in [rally, crash, jagged] {
        let score = compute_sentiment(&flat_bars(&closes, 1000), 30)
            .unwrap()
            .sentiment_analysis
            .sentiment_score;
        assert!((-100..=100).contains(&score));
    }
}

#[test]
fn short_series_yields_insufficient_data_for_sentiment() {
    let err = compute_sentiment(&flat_bars(&[10.0; 9], 100), 30).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientData {
            required: 10,
            actual: 9
        }
    ));
    assert_eq!(err.kind(), "insufficient_data");
}

#[test]
fn indicators_are_idempotent() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + (f64::from(i) * 0.7).sin() * 5.0).collect();
    let series = flat_bars(&closes, 2500);

    let first = serde_json::to_string(&compute_indicators(&series, &overview(), 14).unwrap()).unwrap();
    let second = serde_json::to_string(&compute_indicators(&series, &overview(), 14).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_series_is_rejected_by_indicators() {
    let err = compute_indicators(&Series::from_descending(Vec::new()), &overview(), 14).unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { required: 1, actual: 0 }));
}
