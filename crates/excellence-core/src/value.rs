//! Raw values as they arrive from the backend, and their coercion into
//! spreadsheet-safe [`CellValue`]s.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::cell::CellValue;

/// A value of a record before it is made safe for a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Absent, null or undefined
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Arrays and objects; written as their JSON text
    Json(Value),
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Null),
            Value::String(s) => RawValue::Text(s),
            other => RawValue::Json(other),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::Date(d)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        RawValue::DateTime(dt)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(RawValue::Null)
    }
}

impl RawValue {
    /// JSON form; dates become `YYYY-MM-DD` / ISO timestamps, non-finite
    /// numbers become null.
    pub fn to_json(&self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            RawValue::Text(s) => Value::String(s.clone()),
            RawValue::Date(d) => Value::String(iso_date(*d)),
            RawValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            RawValue::Json(v) => v.clone(),
        }
    }
}

impl From<&CellValue> for RawValue {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => RawValue::Null,
            CellValue::Number(n) => RawValue::Number(*n),
            CellValue::Text(s) => RawValue::Text(s.clone()),
            CellValue::Boolean(b) => RawValue::Bool(*b),
            CellValue::Error(e) => RawValue::Text(e.to_string()),
        }
    }
}

/// Coerce a raw value into something a cell can hold.
///
/// Null and non-finite numbers become empty, dates become `YYYY-MM-DD`,
/// arrays and objects become JSON text. Everything else passes through.
pub fn sanitize_value(value: &RawValue) -> CellValue {
    match value {
        RawValue::Null => CellValue::Empty,
        RawValue::Number(n) if !n.is_finite() => CellValue::Empty,
        RawValue::Number(n) => CellValue::Number(*n),
        RawValue::Bool(b) => CellValue::Boolean(*b),
        RawValue::Text(s) => CellValue::Text(s.clone()),
        RawValue::Date(d) => CellValue::Text(iso_date(*d)),
        RawValue::DateTime(dt) => CellValue::Text(iso_date(dt.date())),
        RawValue::Json(v) => CellValue::Text(v.to_string()),
    }
}

/// Truncate a timestamp string to its calendar date.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`) and naive
/// (`2024-03-01T10:00:00`, `2024-03-01 10:00:00`) timestamps as well as bare
/// dates. Returns `None` for anything else.
pub fn normalize_date_text(text: &str) -> Option<String> {
    let text = text.trim();
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(iso_date(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(iso_date(dt.naive_utc().date()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| iso_date(dt.date()))
}

fn iso_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_non_finite_become_empty() {
        assert_eq!(sanitize_value(&RawValue::Null), CellValue::Empty);
        assert_eq!(sanitize_value(&RawValue::Number(f64::NAN)), CellValue::Empty);
        assert_eq!(
            sanitize_value(&RawValue::Number(f64::INFINITY)),
            CellValue::Empty
        );
        assert_eq!(
            sanitize_value(&RawValue::from(None::<f64>)),
            CellValue::Empty
        );
    }

    #[test]
    fn test_dates_become_iso_calendar_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            sanitize_value(&RawValue::Date(d)),
            CellValue::Text("2024-03-01".into())
        );

        let dt = d.and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(
            sanitize_value(&RawValue::DateTime(dt)),
            CellValue::Text("2024-03-01".into())
        );
    }

    #[test]
    fn test_primitives_pass_through() {
        assert_eq!(sanitize_value(&RawValue::from(100.0)), CellValue::Number(100.0));
        assert_eq!(sanitize_value(&RawValue::from(0.0)), CellValue::Number(0.0));
        assert_eq!(sanitize_value(&RawValue::from("USD")), CellValue::Text("USD".into()));
        assert_eq!(sanitize_value(&RawValue::from(false)), CellValue::Boolean(false));
    }

    #[test]
    fn test_non_primitives_are_stringified() {
        let raw = RawValue::from(json!({"a": [1, 2]}));
        assert_eq!(sanitize_value(&raw), CellValue::Text(r#"{"a":[1,2]}"#.into()));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(RawValue::from(json!(null)), RawValue::Null);
        assert_eq!(RawValue::from(json!(12)), RawValue::Number(12.0));
        assert_eq!(RawValue::from(json!("x")), RawValue::Text("x".into()));
    }

    #[test]
    fn test_normalize_date_text() {
        assert_eq!(normalize_date_text("2024-01-05").as_deref(), Some("2024-01-05"));
        assert_eq!(
            normalize_date_text("2024-01-05T00:00:00").as_deref(),
            Some("2024-01-05")
        );
        assert_eq!(
            normalize_date_text("2024-01-05T10:30:00.000Z").as_deref(),
            Some("2024-01-05")
        );
        assert_eq!(
            normalize_date_text("2024-01-05 08:00:00").as_deref(),
            Some("2024-01-05")
        );
        assert_eq!(normalize_date_text("yesterday"), None);
    }
}
