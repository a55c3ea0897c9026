//! Parsing of Alpha Vantage shaped JSON payloads

use crate::error::{EngineError, Result};
use crate::fundamentals::{Earnings, Statement};
use crate::overview::OverviewFacts;
use crate::series::{Bar, Series, SeriesMeta};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};

const OPEN: &str = "1. open";
const HIGH: &str = "2. high";
const LOW: &str = "3. low";
const CLOSE: &str = "4. close";
const VOLUME: &str = "5. volume";

/// Parse the `series_key` object (e.g. `"Time Series (1min)"`) into a [`Series`]
///
/// Bars are ordered most-recent-first by their parsed timestamps, whatever
/// order the payload's keys arrive in.
pub fn parse_time_series(payload: &Value, series_key: &str, symbol: &str) -> Result<Series> {
    provider_error(payload, symbol)?;

    let entries = payload
        .get(series_key)
        .and_then(Value::as_object)
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| EngineError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: format!("No {series_key} data available"),
        })?;

    let mut keyed = entries
        .iter()
        .map(|(timestamp, fields)| {
            let fields = fields.as_object().ok_or_else(|| EngineError::InvalidNumber {
                field: timestamp.clone(),
                value: fields.to_string(),
            })?;
            Ok((parse_timestamp(timestamp)?, parse_bar(timestamp, fields)?))
        })
        .collect::<Result<Vec<(NaiveDateTime, Bar)>>>()?;

    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::debug!(symbol, bars = keyed.len(), "Parsed time series");
    let series = Series::from_descending(keyed.into_iter().map(|(_, bar)| bar).collect());
    Ok(match parse_meta(payload) {
        Some(meta) => series.with_meta(meta),
        None => series,
    })
}

fn parse_meta(payload: &Value) -> Option<SeriesMeta> {
    let meta = payload.get("Meta Data")?.as_object()?;
    let text = |key: &str| meta.get(key).and_then(Value::as_str).map(str::to_string);
    Some(SeriesMeta {
        symbol: text("2. Symbol"),
        last_refreshed: text("3. Last Refreshed"),
    })
}

/// Parse an `OVERVIEW` payload into [`OverviewFacts`]
pub fn parse_overview(payload: &Value, symbol: &str) -> Result<OverviewFacts> {
    OverviewFacts::from_map(overview_fields(payload, symbol)?)
}

/// The raw `OVERVIEW` key/value bag; must be a non-empty object
pub fn overview_fields<'a>(payload: &'a Value, symbol: &str) -> Result<&'a Map<String, Value>> {
    provider_error(payload, symbol)?;
    payload
        .as_object()
        .filter(|bag| !bag.is_empty())
        .ok_or_else(|| EngineError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "No overview data available".to_string(),
        })
}

/// Parse a `BALANCE_SHEET` or `INCOME_STATEMENT` payload
///
/// Reports keep the payload's order, which Alpha Vantage sends newest first.
pub fn parse_statement(payload: &Value, symbol: &str) -> Result<Statement> {
    provider_error(payload, symbol)?;
    let mut statement = Statement::deserialize(payload)?;
    if statement.symbol.is_empty() {
        statement.symbol = symbol.to_string();
    }
    tracing::debug!(symbol, years = statement.annual_reports.len(), "Parsed annual statement");
    Ok(statement)
}

/// Parse an `EARNINGS` payload
pub fn parse_earnings(payload: &Value, symbol: &str) -> Result<Earnings> {
    provider_error(payload, symbol)?;
    let mut earnings = Earnings::deserialize(payload)?;
    if earnings.symbol.is_empty() {
        earnings.symbol = symbol.to_string();
    }
    Ok(earnings)
}

fn provider_error(payload: &Value, symbol: &str) -> Result<()> {
    match payload.get("Error Message").and_then(Value::as_str) {
        Some(message) => Err(EngineError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: message.to_string(),
        }),
        None => Ok(()),
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| EngineError::InvalidTimestamp(raw.to_string()))
}

fn parse_bar(timestamp: &str, fields: &Map<String, Value>) -> Result<Bar> {
    Ok(Bar {
        timestamp: timestamp.to_string(),
        open: number(fields, OPEN)?,
        high: number(fields, HIGH)?,
        low: number(fields, LOW)?,
        close: number(fields, CLOSE)?,
        volume: volume(fields)?,
    })
}

fn raw_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    fields.get(key).ok_or_else(|| EngineError::missing(key))
}

fn invalid(key: &str, value: &Value) -> EngineError {
    EngineError::InvalidNumber {
        field: key.to_string(),
        value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
    }
}

fn number(fields: &Map<String, Value>, key: &str) -> Result<f64> {
    let value = raw_field(fields, key)?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| invalid(key, value))
}

fn volume(fields: &Map<String, Value>) -> Result<u64> {
    let value = raw_field(fields, VOLUME)?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(VOLUME, value))
}
