//! Small numeric helpers shared by the indicators, trend and sentiment code
//!
//! Every denominator that can legitimately be zero is checked here and replaced
//! with a defined fallback instead of producing NaN or infinity.

/// Round to 2 decimal places
///
/// Rounds the exact binary value, so `2.675` (stored just below the tie)
/// becomes `2.67`. Negative zero is normalized to `0.0`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}")
        .parse::<f64>()
        .map_or(value, |rounded| rounded + 0.0)
}

/// Arithmetic mean; `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); `0.0` below two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Standard deviation relative to the mean, in percent; `0.0` when the mean is not positive
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg <= 0.0 {
        return 0.0;
    }
    sample_std_dev(values) / avg * 100.0
}

/// Percent change from `start` to `current`; `0.0` when `start` is zero
pub fn percent_change(start: f64, current: f64) -> f64 {
    if start == 0.0 {
        return 0.0;
    }
    (current - start) / start * 100.0
}

/// `numerator / denominator`, or `fallback` when the denominator is not positive
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        fallback
    }
}
