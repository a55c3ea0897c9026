//! Technical indicator report: RSI, MACD, SMA, EMA and overview facts

use crate::error::{EngineError, Result};
use crate::indicators::{MacdValues, ema, macd, rsi, sma};
use crate::overview::OverviewFacts;
use crate::series::Series;
use crate::stats::round2;
use serde::Serialize;

/// RSI zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RsiZone {
    Overbought,
    Bullish,
    Neutral,
    Bearish,
    Oversold,
}

impl RsiZone {
    /// `> 70` Overbought, `< 30` Oversold, `> 60` Bullish, `< 40` Bearish
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > 70.0 {
            Self::Overbought
        } else if rsi < 30.0 {
            Self::Oversold
        } else if rsi > 60.0 {
            Self::Bullish
        } else if rsi < 40.0 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    pub fn trading_signal(self) -> &'static str {
        match self {
            Self::Overbought => "Consider selling or taking profits",
            Self::Oversold => "Consider buying on dips",
            Self::Bullish => "Upward momentum",
            Self::Bearish => "Downward pressure",
            Self::Neutral => "Hold",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Overbought => "overbought",
            Self::Bullish => "bullish",
            Self::Neutral => "neutral",
            Self::Bearish => "bearish",
            Self::Oversold => "oversold",
        }
    }
}

/// Latest price compared with both short moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShortTermTrend {
    #[serde(rename = "Short-term Uptrend")]
    Uptrend,
    #[serde(rename = "Short-term Downtrend")]
    Downtrend,
    Sideways,
}

impl ShortTermTrend {
    fn classify(price: f64, sma: f64, ema: f64) -> Self {
        if price > sma && price > ema {
            Self::Uptrend
        } else if price < sma && price < ema {
            Self::Downtrend
        } else {
            Self::Sideways
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Uptrend => "short-term uptrend",
            Self::Downtrend => "short-term downtrend",
            Self::Sideways => "sideways",
        }
    }
}

/// MACD histogram reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MacdSignal {
    #[serde(rename = "Strong Bullish - MACD well above signal")]
    StrongBullish,
    #[serde(rename = "Bullish - MACD above signal")]
    Bullish,
    Neutral,
    #[serde(rename = "Bearish - MACD below signal")]
    Bearish,
    #[serde(rename = "Strong Bearish - MACD well below signal")]
    StrongBearish,
}

impl MacdSignal {
    /// Histogram `> 0.5`, `> 0`, `< -0.5`, `< 0`
    pub fn from_histogram(histogram: f64) -> Self {
        if histogram > 0.5 {
            Self::StrongBullish
        } else if histogram > 0.0 {
            Self::Bullish
        } else if histogram < -0.5 {
            Self::StrongBearish
        } else if histogram < 0.0 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::StrongBullish => "Strong Bullish - MACD well above signal",
            Self::Bullish => "Bullish - MACD above signal",
            Self::Neutral => "Neutral",
            Self::Bearish => "Bearish - MACD below signal",
            Self::StrongBearish => "Strong Bearish - MACD well below signal",
        }
    }
}

/// Volatility relative to the market, from beta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BetaVolatility {
    #[serde(rename = "High - More volatile than market")]
    High,
    #[serde(rename = "Moderate-High")]
    ModerateHigh,
    #[serde(rename = "Moderate-Low")]
    ModerateLow,
    #[serde(rename = "Low - Less volatile than market")]
    Low,
}

impl BetaVolatility {
    /// `> 1.2` High, `< 0.8` Low, `> 1.0` Moderate-High, else Moderate-Low
    pub fn from_beta(beta: f64) -> Self {
        if beta > 1.2 {
            Self::High
        } else if beta < 0.8 {
            Self::Low
        } else if beta > 1.0 {
            Self::ModerateHigh
        } else {
            Self::ModerateLow
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::High => "high - more volatile than market",
            Self::ModerateHigh => "moderate-high",
            Self::ModerateLow => "moderate-low",
            Self::Low => "low - less volatile than market",
        }
    }
}

/// Relationship of the 50-day and 200-day averages from the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LongTermTrend {
    #[serde(rename = "Bullish - 50-day above 200-day")]
    Bullish,
    #[serde(rename = "Bearish - 50-day below 200-day")]
    Bearish,
    Neutral,
}

impl LongTermTrend {
    fn classify(sma50: f64, sma200: f64) -> Self {
        if sma50 > sma200 {
            Self::Bullish
        } else if sma50 < sma200 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

/// Numeric indicator values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalIndicators {
    pub rsi: f64,
    pub rsi_period: usize,
    pub macd: MacdValues,
    pub sma: f64,
    pub ema: f64,
    pub beta: f64,
    pub week52_high: f64,
    pub week52_low: f64,
    pub position_in_52_week_range: f64,
}

/// Labels attached to the indicator values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorAnalysis {
    pub momentum: RsiZone,
    pub short_term_trend: ShortTermTrend,
    pub macd_signal: MacdSignal,
    pub volatility: BetaVolatility,
    pub trading_signal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_trend: Option<LongTermTrend>,
}

/// One sentence per indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorInterpretation {
    pub rsi: String,
    pub trend: String,
    pub macd: String,
    pub volatility: String,
    pub week52_position: String,
    pub recommendation: String,
}

/// Technical indicator report for one series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReport {
    pub timestamp: String,
    pub current_price: f64,
    pub technical_indicators: TechnicalIndicators,
    pub analysis: IndicatorAnalysis,
    pub interpretation: IndicatorInterpretation,
}

/// Compute RSI, MACD, SMA and EMA over the whole series
///
/// `period` drives RSI and both short moving averages. Short history never
/// fails here; each indicator falls back to its own sentinel. Only an empty
/// series is rejected.
pub fn compute_indicators(
    series: &Series,
    overview: &OverviewFacts,
    period: usize,
) -> Result<IndicatorReport> {
    let latest = series.latest().ok_or(EngineError::InsufficientData {
        required: 1,
        actual: 0,
    })?;
    let closes = series.columns(None).closes;
    let current_price = latest.close;

    let rsi_value = rsi(&closes, period);
    let macd_values = macd(&closes);
    let sma_value = sma(&closes, period);
    let ema_value = ema(&closes, period);
    let range_position = overview.position_in_range(current_price);

    let momentum = RsiZone::from_rsi(rsi_value);
    let short_term_trend = ShortTermTrend::classify(current_price, sma_value, ema_value);
    let macd_signal = MacdSignal::from_histogram(macd_values.histogram);
    let volatility = BetaVolatility::from_beta(overview.beta);
    let long_term_trend = overview
        .sma50
        .zip(overview.sma200)
        .map(|(fast, slow)| LongTermTrend::classify(fast, slow));
    let trading_signal = momentum.trading_signal();

    let position = format!("{range_position:.1}");

    Ok(IndicatorReport {
        timestamp: latest.timestamp.clone(),
        current_price: round2(current_price),
        technical_indicators: TechnicalIndicators {
            rsi: rsi_value,
            rsi_period: period,
            macd: macd_values,
            sma: sma_value,
            ema: ema_value,
            beta: overview.beta,
            week52_high: overview.week52_high,
            week52_low: overview.week52_low,
            position_in_52_week_range: round2(range_position),
        },
        analysis: IndicatorAnalysis {
            momentum,
            short_term_trend,
            macd_signal,
            volatility,
            trading_signal: trading_signal.to_string(),
            long_term_trend,
        },
        interpretation: IndicatorInterpretation {
            rsi: format!("RSI at {rsi_value} indicates {} conditions", momentum.label()),
            trend: format!(
                "Price at ${current_price} relative to moving averages suggests {}",
                short_term_trend.label()
            ),
            macd: macd_signal.as_str().to_string(),
            volatility: format!(
                "Beta of {} indicates {} volatility",
                overview.beta,
                volatility.label()
            ),
            week52_position: format!("Trading at {position}% of 52-week range"),
            recommendation: trading_signal.to_string(),
        },
    })
}
