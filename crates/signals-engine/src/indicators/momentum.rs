//! Relative Strength Index

use crate::stats::{mean, round2};

/// Default RSI lookback for intraday bars
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Neutral reading returned when there is not enough history
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index over most-recent-first prices
///
/// Deltas are `values[i] - values[i + 1]` (newer minus next-older). The first
/// `period` gains and losses are averaged, with no Wilder smoothing. Returns
/// [`NEUTRAL_RSI`] with fewer than `period + 1` prices and `100.0` when the
/// sampled window holds no losses.
pub fn rsi(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period + 1 {
        tracing::debug!(period, len = values.len(), "RSI needs period + 1 prices, returning neutral");
        return NEUTRAL_RSI;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = values
        .windows(2)
        .take(period)
        .map(|pair| {
            let change = pair[0] - pair[1];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, change.abs())
            }
        })
        .unzip();

    let avg_gain = mean(&gains);
    let avg_loss = mean(&losses);

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    round2(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_insufficient_is_neutral() {
        let values: Vec<f64> = (0..14).map(f64::from).collect();
        assert_eq!(rsi(&values, 14), 50.0);
        assert_eq!(rsi(&[], 14), 50.0);
        assert_eq!(rsi(&[1.0, 2.0], 0), 50.0);
    }

    #[test]
    fn test_rsi_all_gains_is_100() {
        // most recent first, so a falling list of numbers is a rising market
        let values: Vec<f64> = (0..20).rev().map(f64::from).collect();
        assert_eq!(rsi(&values, 14), 100.0);
    }

    #[test]
    fn test_rsi_flat_is_100() {
        assert_eq!(rsi(&[10.0; 15], 14), 100.0);
    }

    #[test]
    fn test_rsi_all_losses_is_0() {
        let values: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(rsi(&values, 14), 0.0);
    }

    #[test]
    fn test_rsi_mixed() {
        // deltas (newer - older): +2, -1, +2, -1 -> avg gain 1.0, avg loss 0.5, RS 2
        let values = [104.0, 102.0, 103.0, 101.0, 102.0];
        assert_eq!(rsi(&values, 4), 66.67);
    }

    #[test]
    fn test_rsi_only_samples_first_period_deltas() {
        // the big drop is beyond the sampled window
        let values = [105.0, 104.0, 103.0, 200.0];
        assert_eq!(rsi(&values, 2), 100.0);
    }

    #[test]
    fn test_rsi_bounded() {
        let values = [
            101.3, 99.8, 102.4, 98.1, 97.7, 103.9, 100.0, 99.9, 104.2, 95.5, 96.0, 101.1, 99.2,
            98.8, 102.0, 100.7,
        ];
        for period in 1..values.len() {
            let value = rsi(&values, period);
            assert!((0.0..=100.0).contains(&value), "period {period}: {value}");
        }
    }
}
