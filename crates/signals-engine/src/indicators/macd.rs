//! Moving Average Convergence Divergence

use super::moving_average::ema;
use crate::stats::round2;
use serde::{Deserialize, Serialize};

/// Fast EMA period
pub const FAST_PERIOD: usize = 12;

/// Slow EMA period, also the minimum history for a non-zero MACD
pub const SLOW_PERIOD: usize = 26;

/// Factor applied to the MACD line to derive the signal line
///
/// This is a simplified proxy, not a 9-period EMA of the MACD line. Downstream
/// consumers depend on these exact values, so keep it as is.
pub const SIGNAL_FACTOR: f64 = 0.9;

/// MACD line, signal line and histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD over most-recent-first prices
///
/// Fewer than [`SLOW_PERIOD`] prices yields the all-zero triple.
pub fn macd(values: &[f64]) -> MacdValues {
    if values.len() < SLOW_PERIOD {
        tracing::debug!(len = values.len(), "MACD needs {SLOW_PERIOD} prices, returning zeros");
        return MacdValues::default();
    }

    let macd_line = ema(values, FAST_PERIOD) - ema(values, SLOW_PERIOD);
    let signal_line = macd_line * SIGNAL_FACTOR;
    let histogram = macd_line - signal_line;

    MacdValues {
        macd: round2(macd_line),
        signal: round2(signal_line),
        histogram: round2(histogram),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_short_history_is_zero() {
        let values: Vec<f64> = (0..25).map(|i| 100.0 + f64::from(i)).collect();
        assert_eq!(macd(&values), MacdValues::default());
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let values = [50.0; 40];
        assert_eq!(macd(&values), MacdValues::default());
    }

    #[test]
    fn test_macd_on_exactly_26_values() {
        // ema26 is its seed mean(125..=100) = 112.5; ema12 is seeded with the
        // 12 newest values (mean 119.5) and then folds through the 14 older
        // ones down to 105.5
        let values: Vec<f64> = (100..126).rev().map(f64::from).collect();
        let result = macd(&values);
        assert_eq!(result.macd, -7.0);
        assert_eq!(result.signal, -6.3);
        assert_eq!(result.histogram, -0.7);
    }

    #[test]
    fn test_signal_is_ninety_percent_of_independent_line() {
        let values: Vec<f64> = (0..40)
            .map(|i| 100.0 + f64::from(i % 7) * 1.5 - f64::from(i) * 0.25)
            .collect();
        let line = ema(&values, FAST_PERIOD) - ema(&values, SLOW_PERIOD);

        let result = macd(&values);
        assert_eq!(result.macd, round2(line));
        assert_eq!(result.signal, round2(line * SIGNAL_FACTOR));
        assert_eq!(result.histogram, round2(line - line * SIGNAL_FACTOR));
    }
}
