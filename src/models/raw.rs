// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tolerant coercions from loosely-typed feed fields.
//!
//! Every function here is total: a malformed field degrades to a default
//! (`0.0`, `""`, `None`, empty list) instead of failing the record.
//!
//! | kind   | missing / null | string            | number     | wrapped object                         |
//! |--------|----------------|-------------------|------------|----------------------------------------|
//! | number | `0`            | parsed, else `0`  | itself     | `$numberLong` / `$numberInt` unwrapped |
//! | date   | `None`         | parsed, else None | `None`     | `$date` (string, millis, `$numberLong`)|
//! | text   | `""`           | trimmed           | display    | `$oid` / numeric wrappers unwrapped    |
//! | media  | `[]`           | `[]`              | `[]`       | `[]`; arrays keep non-empty strings    |

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// MongoDB extended-JSON wrappers for integers.
const NUMBER_WRAPPERS: [&str; 2] = ["$numberLong", "$numberInt"];

/// Naive timestamp layouts accepted after RFC 3339 fails; interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Coerce a numeric field. Never fails; unusable input yields `0.0`.
pub fn parse_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_numeric_str(s),
        Some(Value::Object(map)) => NUMBER_WRAPPERS
            .iter()
            .find_map(|key| map.get(*key))
            .map(|inner| match inner {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => parse_numeric_str(s),
                _ => 0.0,
            })
            .unwrap_or(0.0),
        Some(_) => 0.0,
    }
}

fn parse_numeric_str(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Coerce a date field to an absolute instant.
pub fn parse_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_date_str(s),
        Value::Object(map) => match map.get("$date")? {
            Value::String(s) => parse_date_str(s),
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            Value::Object(_) => {
                let millis = parse_number(map.get("$date"));
                if millis == 0.0 {
                    return None;
                }
                DateTime::from_timestamp_millis(millis as i64)
            }
            _ => None,
        },
        _ => None,
    }
}

/// Parse an ISO-ish date string. Values without an offset are taken as UTC.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Space separator with an offset, e.g. "2024-07-26 15:30:00+00:00"
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerce a text field, trimming surrounding whitespace.
pub fn normalize_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(other) => display_value(other).trim().to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(map) => {
            if let Some(oid) = map.get("$oid") {
                return display_value(oid);
            }
            if let Some(inner) = NUMBER_WRAPPERS.iter().find_map(|key| map.get(*key)) {
                return display_value(inner);
            }
            value.to_string()
        }
    }
}

/// Coerce a list-of-media field. Only non-empty string entries survive.
pub fn media_urls(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Activity flag: only an explicit `false` deactivates a record.
pub fn is_active(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Bool(false)))
}
