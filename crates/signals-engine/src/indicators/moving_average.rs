//! Simple and exponential moving averages

use crate::stats::{mean, round2};

/// Simple moving average of the `period` most recent values
///
/// Returns `0.0` when fewer than `period` values are available.
pub fn sma(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        tracing::debug!(period, len = values.len(), "SMA unavailable, returning 0.0");
        return 0.0;
    }
    round2(mean(&values[..period]))
}

/// Exponential moving average
///
/// Seeded with the mean of the `period` most recent values, then folded over
/// the remaining (older) values with `k = 2 / (period + 1)`. Intermediate
/// values keep full precision; only the result is rounded. Returns `0.0` when
/// fewer than `period` values are available.
pub fn ema(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        tracing::debug!(period, len = values.len(), "EMA unavailable, returning 0.0");
        return 0.0;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = mean(&values[..period]);
    let ema = values[period..]
        .iter()
        .fold(seed, |prev, &price| (price - prev) * k + prev);

    round2(ema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_uses_most_recent_values() {
        let values = [10.0, 20.0, 30.0, 1000.0];
        assert_eq!(sma(&values, 3), 20.0);
    }

    #[test]
    fn test_sma_period_one_is_first_element() {
        let values = [145.32, 144.0, 143.5];
        assert_eq!(sma(&values, 1), 145.32);
    }

    #[test]
    fn test_sma_insufficient() {
        assert_eq!(sma(&[1.0, 2.0], 3), 0.0);
        assert_eq!(sma(&[1.0, 2.0], 0), 0.0);
        assert_eq!(sma(&[], 1), 0.0);
    }

    #[test]
    fn test_ema_equals_sma_when_length_matches_period() {
        let values = [101.25, 100.5, 99.75, 100.0, 98.5];
        assert_eq!(ema(&values, 5), sma(&values, 5));
    }

    #[test]
    fn test_ema_recurrence() {
        // seed = mean(10, 20) = 15, k = 2/3
        // 30: (30 - 15) * 2/3 + 15 = 25
        // 40: (40 - 25) * 2/3 + 25 = 35
        assert_eq!(ema(&[10.0, 20.0, 30.0, 40.0], 2), 35.0);
    }

    #[test]
    fn test_ema_rounds_only_at_the_end() {
        // seed = 1/3, k = 0.5 -> 0.6666.. -> 0.8333..
        let values = [0.0, 0.0, 1.0, 1.0];
        assert_eq!(ema(&values, 3), 0.67);
        assert_eq!(ema(&[0.0, 0.0, 1.0, 1.0, 1.0], 3), 0.83);
    }

    #[test]
    fn test_ema_insufficient() {
        assert_eq!(ema(&[1.0], 2), 0.0);
    }
}
