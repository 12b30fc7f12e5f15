//! Conversions between JavaScript values and core types.

use chrono::NaiveDate;
use excellence_core::{CellValue, RawValue, Record, Region, WriteError, WriteInstruction};
use js_sys::{Array, Date, Object};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// Structured error object for JavaScript
#[derive(Serialize)]
pub struct JsExcellenceError {
    code: String,
    message: String,
}

impl From<&WriteError> for JsExcellenceError {
    fn from(err: &WriteError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl JsExcellenceError {
    pub fn from_error<E: std::fmt::Display>(code: &str, err: E) -> JsValue {
        let error = Self {
            code: code.to_string(),
            message: err.to_string(),
        };
        to_js(&error)
    }
}

pub fn to_js_error(err: WriteError) -> JsValue {
    to_js(&JsExcellenceError::from(&err))
}

/// Serialize to a plain JS object (no `Map`s)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

/// Region for JavaScript, with the address the host API expects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionData {
    pub address: String,
    pub start_column: u32,
    pub start_row: u32,
    pub end_column: u32,
    pub end_row: u32,
}

impl From<&Region> for RegionData {
    fn from(region: &Region) -> Self {
        RegionData {
            address: region.to_a1(),
            start_column: region.start.column,
            start_row: region.start.row,
            end_column: region.end.column,
            end_row: region.end.row,
        }
    }
}

/// Write instruction for JavaScript
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteInstructionData {
    pub header_region: RegionData,
    pub data_region: RegionData,
    pub header_row: Vec<String>,
    pub data_rows: Vec<Vec<CellValue>>,
}

impl From<WriteInstruction> for WriteInstructionData {
    fn from(plan: WriteInstruction) -> Self {
        WriteInstructionData {
            header_region: (&plan.header_region).into(),
            data_region: (&plan.data_region).into(),
            header_row: plan.header_row,
            data_rows: plan.data_rows,
        }
    }
}

/// Read any JS value as a raw record value.
///
/// `Date` objects keep their UTC calendar date; invalid dates are null.
pub fn raw_from_js(value: &JsValue) -> RawValue {
    if value.is_null() || value.is_undefined() {
        return RawValue::Null;
    }
    if let Some(b) = value.as_bool() {
        return RawValue::Bool(b);
    }
    if let Some(n) = value.as_f64() {
        return RawValue::Number(n);
    }
    if let Some(s) = value.as_string() {
        return RawValue::Text(s);
    }
    if let Some(date) = value.dyn_ref::<Date>() {
        return date_from_js(date).map(RawValue::Date).unwrap_or(RawValue::Null);
    }
    serde_wasm_bindgen::from_value::<serde_json::Value>(value.clone())
        .map(RawValue::from)
        .unwrap_or(RawValue::Null)
}

fn date_from_js(date: &Date) -> Option<NaiveDate> {
    if date.get_time().is_nan() {
        return None;
    }
    NaiveDate::from_ymd_opt(
        date.get_utc_full_year() as i32,
        date.get_utc_month() + 1,
        date.get_utc_date(),
    )
}

/// Read a JS array of plain objects, keeping each object's key order.
pub fn records_from_js(value: &JsValue) -> Result<Vec<Record>, WriteError> {
    let items = value
        .dyn_ref::<Array>()
        .ok_or_else(|| WriteError::MalformedRecords("expected an array of objects".into()))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() || item.is_instance_of::<Array>() {
                return Err(WriteError::MalformedRecords(format!(
                    "item {} is not an object",
                    i
                )));
            }
            let record: Record = Object::entries(item.unchecked_ref::<Object>())
                .iter()
                .filter_map(|entry| {
                    let pair = entry.dyn_into::<Array>().ok()?;
                    let key = pair.get(0).as_string()?;
                    Some((key, raw_from_js(&pair.get(1))))
                })
                .collect();
            Ok(record)
        })
        .collect()
}

/// Read a JS 2-D array (or a single value) as cell values.
pub fn grid_from_js(value: &JsValue) -> Vec<Vec<CellValue>> {
    let cell = |v: &JsValue| excellence_core::sanitize_value(&raw_from_js(v));

    match value.dyn_ref::<Array>() {
        Some(rows) => rows
            .iter()
            .map(|row| match row.dyn_ref::<Array>() {
                Some(cols) => cols.iter().map(|v| cell(&v)).collect(),
                None => vec![cell(&row)],
            })
            .collect(),
        None => vec![vec![cell(value)]],
    }
}
