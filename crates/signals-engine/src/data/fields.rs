//! Lenient numeric field access for Alpha Vantage key/value bags
//!
//! Alpha Vantage reports numbers as strings and writes `"None"` (or an empty
//! string, or `"-"`) for values it does not have.

use crate::error::{EngineError, Result};
use serde_json::{Map, Value};

/// Numeric value under `key`; `None` when the key is absent or marked empty
pub(crate) fn optional_number(bag: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match bag.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed == "-" {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| EngineError::InvalidNumber {
                    field: key.to_string(),
                    value: s.clone(),
                })
        }
        Some(other) => Err(EngineError::InvalidNumber {
            field: key.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Numeric value under `key`, falling back to `default` when absent
pub(crate) fn number_or(bag: &Map<String, Value>, key: &str, default: f64) -> Result<f64> {
    Ok(optional_number(bag, key)?.unwrap_or(default))
}

/// Numeric value under `key`; absent values are a [`EngineError::MissingField`]
pub(crate) fn required_number(bag: &Map<String, Value>, key: &str) -> Result<f64> {
    optional_number(bag, key)?.ok_or_else(|| EngineError::missing(key))
}

/// Text value under `key`, or `default` when absent or marked empty
pub(crate) fn text_or(bag: &Map<String, Value>, key: &str, default: &str) -> String {
    bag.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_placeholders_count_as_absent() {
        let bag = bag(json!({"a": "None", "b": "", "c": "-", "d": null, "e": "12.5", "f": 3}));
        for key in ["a", "b", "c", "d", "missing"] {
            assert_eq!(optional_number(&bag, key).unwrap(), None, "{key}");
        }
        assert_eq!(optional_number(&bag, "e").unwrap(), Some(12.5));
        assert_eq!(optional_number(&bag, "f").unwrap(), Some(3.0));
    }

    #[test]
    fn test_defaults_and_required() {
        let bag = bag(json!({"totalRevenue": "None", "netIncome": "40"}));
        assert_eq!(number_or(&bag, "totalRevenue", 1.0).unwrap(), 1.0);
        assert_eq!(number_or(&bag, "netIncome", 0.0).unwrap(), 40.0);

        let err = required_number(&bag, "totalRevenue").unwrap_err();
        assert!(matches!(err, EngineError::MissingField { field } if field == "totalRevenue"));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let bag = bag(json!({"inventory": "lots", "flag": true}));
        assert_eq!(optional_number(&bag, "inventory").unwrap_err().kind(), "invalid_number");
        assert_eq!(optional_number(&bag, "flag").unwrap_err().kind(), "invalid_number");
    }

    #[test]
    fn test_text_or() {
        let bag = bag(json!({"ExDividendDate": "2024-02-08", "DividendDate": "None"}));
        assert_eq!(text_or(&bag, "ExDividendDate", "N/A"), "2024-02-08");
        assert_eq!(text_or(&bag, "DividendDate", "N/A"), "N/A");
        assert_eq!(text_or(&bag, "Missing", "N/A"), "N/A");
    }
}
