//! Static company overview facts (beta, 52-week range, long moving averages)

use crate::data::fields::{optional_number, required_number};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const BETA: &str = "Beta";
const WEEK_52_HIGH: &str = "52WeekHigh";
const WEEK_52_LOW: &str = "52WeekLow";
const SMA_50: &str = "50DayMovingAverage";
const SMA_200: &str = "200DayMovingAverage";

/// Per-company scalars refreshed far less often than the price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewFacts {
    pub beta: f64,
    pub week52_high: f64,
    pub week52_low: f64,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
}

impl OverviewFacts {
    /// Read the overview from a flat key/value bag
    ///
    /// `Beta`, `52WeekHigh` and `52WeekLow` are required. Values may be JSON
    /// numbers or numeric strings; the literal `"None"` counts as absent.
    pub fn from_map(bag: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            beta: required_number(bag, BETA)?,
            week52_high: required_number(bag, WEEK_52_HIGH)?,
            week52_low: required_number(bag, WEEK_52_LOW)?,
            sma50: optional_number(bag, SMA_50)?,
            sma200: optional_number(bag, SMA_200)?,
        })
    }

    /// Position of `price` within the 52-week range in percent; `0.0` for an empty range
    pub fn position_in_range(&self, price: f64) -> f64 {
        let span = self.week52_high - self.week52_low;
        if span == 0.0 {
            return 0.0;
        }
        (price - self.week52_low) / span * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_alpha_vantage_strings() {
        let facts = OverviewFacts::from_map(&bag(json!({
            "Symbol": "IBM",
            "Beta": "0.71",
            "52WeekHigh": "199.18",
            "52WeekLow": "120.55",
            "50DayMovingAverage": "185.3",
            "200DayMovingAverage": "None"
        })))
        .unwrap();

        assert_eq!(facts.beta, 0.71);
        assert_eq!(facts.week52_high, 199.18);
        assert_eq!(facts.week52_low, 120.55);
        assert_eq!(facts.sma50, Some(185.3));
        assert_eq!(facts.sma200, None);
    }

    #[test]
    fn test_numbers_accepted() {
        let facts = OverviewFacts::from_map(&bag(json!({
            "Beta": 1.2, "52WeekHigh": 150, "52WeekLow": 100
        })))
        .unwrap();
        assert_eq!(facts.week52_high, 150.0);
    }

    #[test]
    fn test_missing_required_field() {
        let err = OverviewFacts::from_map(&bag(json!({
            "52WeekHigh": "150", "52WeekLow": "100"
        })))
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingField { field } if field == "Beta"));
    }

    #[test]
    fn test_invalid_number() {
        let err = OverviewFacts::from_map(&bag(json!({
            "Beta": "high", "52WeekHigh": "150", "52WeekLow": "100"
        })))
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidNumber { .. }));
    }

    #[test]
    fn test_position_in_range() {
        let facts = OverviewFacts {
            beta: 1.0,
            week52_high: 200.0,
            week52_low: 100.0,
            sma50: None,
            sma200: None,
        };
        assert_eq!(facts.position_in_range(125.0), 25.0);

        let flat = OverviewFacts {
            week52_low: 200.0,
            ..facts
        };
        assert_eq!(flat.position_in_range(125.0), 0.0);
    }
}
