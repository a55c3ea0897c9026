//! Weighted multi-factor sentiment scoring
//!
//! Five independent factors each contribute a capped amount to a composite
//! score in `[-100, 100]`:
//!
//! | Factor     | Range      |
//! |------------|------------|
//! | Trend      | ±30        |
//! | Momentum   | ±25        |
//! | Volume     | ±20        |
//! | Pressure   | ±15        |
//! | Volatility | −10..=0    |
//!
//! Volatility only ever subtracts. The caps sum to 100, so the plain sum is
//! already bounded and no clamping is applied.

use crate::config::MIN_ANALYSIS_PERIODS;
use crate::error::Result;
use crate::series::Series;
use crate::stats::{coefficient_of_variation, mean, percent_change, ratio_or};
use crate::trend::Volatility;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of bars examined by [`SentimentScorer`]
pub const DEFAULT_SENTIMENT_LOOKBACK: usize = 30;

/// Bars used for the recent volume mean and the pressure tally
const RECENT_WINDOW: usize = 10;

/// Categorical verdict derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentCategory {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    #[serde(rename = "Moderately Bullish")]
    ModeratelyBullish,
    Neutral,
    #[serde(rename = "Moderately Bearish")]
    ModeratelyBearish,
    Bearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl SentimentCategory {
    /// Ordered ladder: `> 50`, `> 25`, `> 10`, `< -50`, `< -25`, `< -10`, else Neutral
    pub fn from_score(score: i32) -> Self {
        if score > 50 {
            Self::StrongBullish
        } else if score > 25 {
            Self::Bullish
        } else if score > 10 {
            Self::ModeratelyBullish
        } else if score < -50 {
            Self::StrongBearish
        } else if score < -25 {
            Self::Bearish
        } else if score < -10 {
            Self::ModeratelyBearish
        } else {
            Self::Neutral
        }
    }

    pub fn confidence(self) -> Confidence {
        match self {
            Self::StrongBullish | Self::StrongBearish => Confidence::High,
            Self::Bullish | Self::Bearish => Confidence::MediumHigh,
            Self::ModeratelyBullish | Self::ModeratelyBearish => Confidence::Medium,
            Self::Neutral => Confidence::Low,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::StrongBullish => "Strong buy signal - Consider accumulating position",
            Self::Bullish => "Buy signal - Consider entering or adding to position",
            Self::ModeratelyBullish => "Cautiously optimistic - Consider buying on dips",
            Self::Neutral => "Hold and wait for clearer signals",
            Self::ModeratelyBearish => "Cautiously pessimistic - Avoid new positions",
            Self::Bearish => "Sell signal - Consider exiting position",
            Self::StrongBearish => "Strong sell signal - Consider reducing exposure",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongBullish => "Strong Bullish",
            Self::Bullish => "Bullish",
            Self::ModeratelyBullish => "Moderately Bullish",
            Self::Neutral => "Neutral",
            Self::ModeratelyBearish => "Moderately Bearish",
            Self::Bearish => "Bearish",
            Self::StrongBearish => "Strong Bearish",
        }
    }
}

/// How much weight the verdict deserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    #[serde(rename = "Medium-High")]
    MediumHigh,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::MediumHigh => "Medium-High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Relative strength of one side of the order flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureLevel {
    Strong,
    Moderate,
    Weak,
}

impl PressureLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

/// Volume read together with the sign of the price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeSignal {
    #[serde(rename = "Strong Accumulation")]
    StrongAccumulation,
    Accumulation,
    Neutral,
    Distribution,
    #[serde(rename = "Strong Distribution")]
    StrongDistribution,
}

impl VolumeSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongAccumulation => "Strong Accumulation",
            Self::Accumulation => "Accumulation",
            Self::Neutral => "Neutral",
            Self::Distribution => "Distribution",
            Self::StrongDistribution => "Strong Distribution",
        }
    }
}

/// Balance of up periods against down periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumIndicator {
    #[serde(rename = "Strong Positive")]
    StrongPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "Strong Negative")]
    StrongNegative,
}

impl MomentumIndicator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongPositive => "Strong Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::StrongNegative => "Strong Negative",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor contributions to the composite score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub trend: i32,
    pub momentum: i32,
    pub volume: i32,
    pub pressure: i32,
    pub volatility: i32,
}

impl SubScores {
    pub fn total(&self) -> i32 {
        self.trend + self.momentum + self.volume + self.pressure + self.volatility
    }
}

/// Raw output of [`SentimentScorer::score`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentAnalysis {
    pub periods: usize,
    pub score: i32,
    pub category: SentimentCategory,
    pub confidence: Confidence,
    pub subscores: SubScores,
    pub momentum_indicator: MomentumIndicator,
    pub volume_signal: VolumeSignal,
    pub buying_pressure: PressureLevel,
    pub selling_pressure: PressureLevel,
    pub pressure_tally: i32,
    pub risk_level: Volatility,
    pub current_price: f64,
    pub start_price: f64,
    pub price_change_percent: f64,
    pub up_periods: usize,
    pub down_periods: usize,
    pub average_volume: f64,
    pub recent_volume: f64,
    pub volume_ratio: f64,
    pub coefficient_of_variation: f64,
    pub timeframe: Option<String>,
}

/// Scores market sentiment over the most recent bars
#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer {
    lookback: usize,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(DEFAULT_SENTIMENT_LOOKBACK)
    }
}

impl SentimentScorer {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    /// Score the first `lookback` bars of `series`
    ///
    /// Fails with `InsufficientData` when fewer than 10 bars are available;
    /// no partial score is produced in that case.
    pub fn score(&self, series: &Series) -> Result<SentimentAnalysis> {
        let cols = series.columns(Some(self.lookback));
        cols.require(MIN_ANALYSIS_PERIODS)?;

        let n = cols.len();
        let closes = &cols.closes;
        let current_price = closes[0];
        let start_price = closes[n - 1];
        let change = percent_change(start_price, current_price);

        let trend = trend_score(change);

        let up_periods = closes.windows(2).filter(|w| w[0] > w[1]).count();
        let down_periods = closes.windows(2).filter(|w| w[0] < w[1]).count();
        let (momentum, momentum_indicator) = momentum_score(up_periods, down_periods);

        let average_volume = mean(&cols.volumes);
        let recent_volume = mean(&cols.volumes[..RECENT_WINDOW.min(n)]);
        let volume_ratio = ratio_or(recent_volume, average_volume, 1.0);
        let (volume, volume_signal) = volume_score(volume_ratio, change);

        let pressure_tally: i32 = (0..RECENT_WINDOW.min(n))
            .map(|i| close_position_vote(closes[i], cols.highs[i], cols.lows[i]))
            .sum();
        let (pressure, buying_pressure, selling_pressure) = pressure_score(pressure_tally);

        let cv = coefficient_of_variation(closes);
        let risk_level = Volatility::from_coefficient_of_variation(cv);
        let volatility = match risk_level {
            Volatility::High => -10,
            Volatility::Moderate => -5,
            Volatility::Low => 0,
        };

        let subscores = SubScores {
            trend,
            momentum,
            volume,
            pressure,
            volatility,
        };
        let score = subscores.total();
        let category = SentimentCategory::from_score(score);

        tracing::debug!(periods = n, score, %category, ?subscores, "Scored sentiment");

        Ok(SentimentAnalysis {
            periods: n,
            score,
            category,
            confidence: category.confidence(),
            subscores,
            momentum_indicator,
            volume_signal,
            buying_pressure,
            selling_pressure,
            pressure_tally,
            risk_level,
            current_price,
            start_price,
            price_change_percent: change,
            up_periods,
            down_periods,
            average_volume,
            recent_volume,
            volume_ratio,
            coefficient_of_variation: cv,
            timeframe: cols.timeframe(),
        })
    }
}

fn trend_score(change_percent: f64) -> i32 {
    if change_percent > 3.0 {
        30
    } else if change_percent > 1.0 {
        15
    } else if change_percent < -3.0 {
        -30
    } else if change_percent < -1.0 {
        -15
    } else {
        0
    }
}

fn momentum_score(up: usize, down: usize) -> (i32, MomentumIndicator) {
    let (up_f, down_f) = (up as f64, down as f64);
    if up_f > down_f * 1.5 {
        (25, MomentumIndicator::StrongPositive)
    } else if up > down {
        (12, MomentumIndicator::Positive)
    } else if down_f > up_f * 1.5 {
        (-25, MomentumIndicator::StrongNegative)
    } else if down > up {
        (-12, MomentumIndicator::Negative)
    } else {
        (0, MomentumIndicator::Neutral)
    }
}

fn volume_score(ratio: f64, change_percent: f64) -> (i32, VolumeSignal) {
    if change_percent > 0.0 {
        if ratio > 1.3 {
            return (20, VolumeSignal::StrongAccumulation);
        } else if ratio > 1.1 {
            return (10, VolumeSignal::Accumulation);
        }
    } else if change_percent < 0.0 {
        if ratio > 1.3 {
            return (-20, VolumeSignal::StrongDistribution);
        } else if ratio > 1.1 {
            return (-10, VolumeSignal::Distribution);
        }
    }
    (0, VolumeSignal::Neutral)
}

/// +1 when the close sits in the top 30% of the bar's range, -1 in the bottom 30%
fn close_position_vote(close: f64, high: f64, low: f64) -> i32 {
    let range = high - low;
    if range <= 0.0 {
        return 0;
    }
    let position = (close - low) / range;
    if position > 0.7 {
        1
    } else if position < 0.3 {
        -1
    } else {
        0
    }
}

fn pressure_score(tally: i32) -> (i32, PressureLevel, PressureLevel) {
    use PressureLevel::{Moderate, Strong, Weak};

    if tally > 5 {
        (15, Strong, Weak)
    } else if tally > 2 {
        (8, Moderate, Weak)
    } else if tally < -5 {
        (-15, Weak, Strong)
    } else if tally < -2 {
        (-8, Weak, Moderate)
    } else {
        (0, Moderate, Moderate)
    }
}
