//! OHLCV bars and the most-recent-first series they form
//!
//! Every algorithm in this crate reads a [`Series`] where index 0 is the most
//! recent bar and the last index the oldest. The only way to build one is
//! through [`Series::from_descending`] or [`Series::from_ascending`], so the
//! ordering is decided once, at the boundary, instead of at every call site.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// One time-stamped open/high/low/close/volume observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(
        timestamp: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl ta::Open for Bar {
    fn open(&self) -> f64 {
        self.open
    }
}

impl ta::High for Bar {
    fn high(&self) -> f64 {
        self.high
    }
}

impl ta::Low for Bar {
    fn low(&self) -> f64 {
        self.low
    }
}

impl ta::Close for Bar {
    fn close(&self) -> f64 {
        self.close
    }
}

impl ta::Volume for Bar {
    fn volume(&self) -> f64 {
        self.volume as f64
    }
}

/// Provider metadata published alongside the bars
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMeta {
    pub symbol: Option<String>,
    pub last_refreshed: Option<String>,
}

/// Bars ordered most-recent-first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    bars: Vec<Bar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<SeriesMeta>,
}

impl Series {
    /// Wrap bars that are already ordered most-recent-first
    pub fn from_descending(bars: Vec<Bar>) -> Self {
        Self { bars, meta: None }
    }

    /// Wrap bars ordered oldest-first, reversing them
    pub fn from_ascending(mut bars: Vec<Bar>) -> Self {
        bars.reverse();
        Self::from_descending(bars)
    }

    /// Attach provider metadata
    pub fn with_meta(mut self, meta: SeriesMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn meta(&self) -> Option<&SeriesMeta> {
        self.meta.as_ref()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar
    pub fn latest(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Bars, most recent first
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// Extract aligned numeric columns from the first `limit` bars
    ///
    /// `None` takes the whole series. The extractor only truncates; minimum
    /// sample sizes are enforced by the caller through [`PriceColumns::require`].
    pub fn columns(&self, limit: Option<usize>) -> PriceColumns {
        let take = limit.map_or(self.bars.len(), |l| l.min(self.bars.len()));
        let window = &self.bars[..take];

        PriceColumns {
            closes: window.iter().map(|b| b.close).collect(),
            opens: window.iter().map(|b| b.open).collect(),
            highs: window.iter().map(|b| b.high).collect(),
            lows: window.iter().map(|b| b.low).collect(),
            volumes: window.iter().map(|b| b.volume as f64).collect(),
            newest_timestamp: window.first().map(|b| b.timestamp.clone()),
            oldest_timestamp: window.last().map(|b| b.timestamp.clone()),
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

/// Aligned price and volume columns, most recent first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceColumns {
    pub closes: Vec<f64>,
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub volumes: Vec<f64>,
    pub newest_timestamp: Option<String>,
    pub oldest_timestamp: Option<String>,
}

impl PriceColumns {
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Fail with `InsufficientData` unless at least `min` observations exist
    pub fn require(&self, min: usize) -> Result<&Self> {
        if self.len() < min {
            return Err(EngineError::InsufficientData {
                required: min,
                actual: self.len(),
            });
        }
        Ok(self)
    }

    /// "oldest to newest" label for the window, e.g. for report headers
    pub fn timeframe(&self) -> Option<String> {
        match (&self.oldest_timestamp, &self.newest_timestamp) {
            (Some(oldest), Some(newest)) => Some(format!("{oldest} to {newest}")),
            _ => None,
        }
    }
}
