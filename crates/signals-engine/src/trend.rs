//! Short-term trend, support/resistance and volatility classification

use crate::config::MIN_ANALYSIS_PERIODS;
use crate::error::Result;
use crate::series::Series;
use crate::stats::{coefficient_of_variation, mean, percent_change, ratio_or, sample_std_dev};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of bars examined by [`TrendClassifier`]
pub const DEFAULT_TREND_LOOKBACK: usize = 50;

/// Bars used for the short-window momentum delta and the recent volume mean
const SHORT_WINDOW: usize = 5;

/// Overall direction of the segment means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Uptrend,
    Downtrend,
    Sideways,
}

impl TrendDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uptrend => "Uptrend",
            Self::Downtrend => "Downtrend",
            Self::Sideways => "Sideways",
        }
    }
}

/// Magnitude of the percent change over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl TrendStrength {
    /// `|Δ%| > 5` Strong, `> 2` Moderate, else Weak
    pub fn from_percent_change(change_percent: f64) -> Self {
        let magnitude = change_percent.abs();
        if magnitude > 5.0 {
            Self::Strong
        } else if magnitude > 2.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }
}

/// Volatility bucket from the coefficient of variation (in percent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Moderate,
    High,
}

impl Volatility {
    /// `> 3` High, `> 1.5` Moderate, else Low
    pub fn from_coefficient_of_variation(cv: f64) -> Self {
        if cv > 3.0 {
            Self::High
        } else if cv > 1.5 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Momentum label combining direction with the short-window delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendMomentum {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl TrendMomentum {
    fn classify(direction: TrendDirection, recent_change: f64) -> Self {
        if recent_change > 0.0 {
            if direction == TrendDirection::Uptrend {
                Self::StrongBullish
            } else {
                Self::Bullish
            }
        } else if recent_change < 0.0 {
            if direction == TrendDirection::Downtrend {
                Self::StrongBearish
            } else {
                Self::Bearish
            }
        } else {
            Self::Neutral
        }
    }

    pub fn is_bullish(self) -> bool {
        matches!(self, Self::Bullish | Self::StrongBullish)
    }

    pub fn is_bearish(self) -> bool {
        matches!(self, Self::Bearish | Self::StrongBearish)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBullish => "Strong Bullish",
            Self::Bullish => "Bullish",
            Self::Neutral => "Neutral",
            Self::Bearish => "Bearish",
            Self::StrongBearish => "Strong Bearish",
        }
    }
}

/// Recognized recent price pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePattern {
    #[serde(rename = "Higher highs and higher lows")]
    HigherHighsHigherLows,
    #[serde(rename = "Lower highs and lower lows")]
    LowerHighsLowerLows,
    #[serde(rename = "High volatility with no clear direction")]
    Choppy,
    Consolidation,
}

impl PricePattern {
    fn classify(direction: TrendDirection, momentum: TrendMomentum, volatility: Volatility) -> Self {
        match direction {
            TrendDirection::Uptrend if momentum.is_bullish() => Self::HigherHighsHigherLows,
            TrendDirection::Downtrend if momentum.is_bearish() => Self::LowerHighsLowerLows,
            _ if volatility == Volatility::High => Self::Choppy,
            _ => Self::Consolidation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HigherHighsHigherLows => "Higher highs and higher lows",
            Self::LowerHighsLowerLows => "Lower highs and lower lows",
            Self::Choppy => "High volatility with no clear direction",
            Self::Consolidation => "Consolidation",
        }
    }
}

/// Recent volume compared with the window average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Average,
}

impl VolumeTrend {
    /// ratio `> 1.2` Increasing, `< 0.8` Decreasing, else Average
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.2 {
            Self::Increasing
        } else if ratio < 0.8 {
            Self::Decreasing
        } else {
            Self::Average
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Increasing => "Increasing (Strong interest)",
            Self::Decreasing => "Decreasing (Weak interest)",
            Self::Average => "Average",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(TrendDirection, TrendStrength, Volatility, TrendMomentum, PricePattern);

/// Mean close of the recent, middle and older thirds of a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMeans {
    pub recent: f64,
    pub middle: f64,
    pub older: f64,
}

impl SegmentMeans {
    /// Split most-recent-first closes into three segments of `len / 3` bars
    ///
    /// The remainder of the integer division always lands in the older
    /// segment, so a window of 11 splits 3 / 3 / 5.
    pub fn of(closes: &[f64]) -> Self {
        let seg = closes.len() / 3;
        Self {
            recent: mean(&closes[..seg]),
            middle: mean(&closes[seg..2 * seg]),
            older: mean(&closes[2 * seg..]),
        }
    }

    pub fn direction(&self) -> TrendDirection {
        if self.recent > self.middle && self.middle > self.older {
            TrendDirection::Uptrend
        } else if self.recent < self.middle && self.middle < self.older {
            TrendDirection::Downtrend
        } else {
            TrendDirection::Sideways
        }
    }
}

/// Raw output of [`TrendClassifier::classify`]; values are unrounded
#[derive(Debug, Clone, PartialEq)]
pub struct TrendAnalysis {
    pub periods: usize,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    pub volatility: Volatility,
    pub momentum: TrendMomentum,
    pub pattern: PricePattern,
    pub volume_trend: VolumeTrend,
    pub segments: SegmentMeans,
    pub support: f64,
    pub resistance: f64,
    pub current_price: f64,
    pub start_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub average_price: f64,
    pub standard_deviation: f64,
    pub coefficient_of_variation: f64,
    pub average_volume: f64,
    pub recent_volume: f64,
    pub distance_from_support: f64,
    pub distance_from_resistance: f64,
    pub timeframe: Option<String>,
}

/// Classifies direction, strength and volatility over the most recent bars
#[derive(Debug, Clone, Copy)]
pub struct TrendClassifier {
    lookback: usize,
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_LOOKBACK)
    }
}

impl TrendClassifier {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    /// Classify the first `lookback` bars of `series`
    ///
    /// Fails with `InsufficientData` when fewer than 10 bars are available.
    pub fn classify(&self, series: &Series) -> Result<TrendAnalysis> {
        let cols = series.columns(Some(self.lookback));
        cols.require(MIN_ANALYSIS_PERIODS)?;

        let n = cols.len();
        let closes = &cols.closes;

        let support = cols.lows.iter().copied().fold(f64::INFINITY, f64::min);
        let resistance = cols.highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let segments = SegmentMeans::of(closes);
        let direction = segments.direction();

        let current_price = closes[0];
        let start_price = closes[n - 1];
        let price_change = current_price - start_price;
        let price_change_percent = percent_change(start_price, current_price);
        let strength = TrendStrength::from_percent_change(price_change_percent);

        let cv = coefficient_of_variation(closes);
        let volatility = Volatility::from_coefficient_of_variation(cv);

        let recent_change = current_price - closes[SHORT_WINDOW.min(n - 1)];
        let momentum = TrendMomentum::classify(direction, recent_change);
        let pattern = PricePattern::classify(direction, momentum, volatility);

        let average_volume = mean(&cols.volumes);
        let recent_volume = mean(&cols.volumes[..SHORT_WINDOW.min(n)]);
        let volume_trend = VolumeTrend::from_ratio(ratio_or(recent_volume, average_volume, 1.0));

        let distance_from_support = ratio_or(current_price - support, current_price, 0.0) * 100.0;
        let distance_from_resistance =
            ratio_or(resistance - current_price, current_price, 0.0) * 100.0;

        tracing::debug!(
            periods = n,
            %direction,
            %strength,
            %volatility,
            "Classified trend"
        );

        Ok(TrendAnalysis {
            periods: n,
            direction,
            strength,
            volatility,
            momentum,
            pattern,
            volume_trend,
            segments,
            support,
            resistance,
            current_price,
            start_price,
            price_change,
            price_change_percent,
            average_price: mean(closes),
            standard_deviation: sample_std_dev(closes),
            coefficient_of_variation: cv,
            average_volume,
            recent_volume,
            distance_from_support,
            distance_from_resistance,
            timeframe: cols.timeframe(),
        })
    }
}
