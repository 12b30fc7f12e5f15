use excellence_core::{
    column_label as core_column_label, resolve_anchor as core_resolve_anchor,
    sanitize_value as core_sanitize_value, write_records, Environment, EnvironmentConfig,
    HeaderStyle, InsertError,
};
use excellence_functions::Arg;
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::convert::{
    grid_from_js, raw_from_js, records_from_js, to_js, to_js_error, JsExcellenceError,
    WriteInstructionData,
};
use crate::host::CallbackHost;

fn columns_from_js(columns: JsValue) -> Result<Option<Vec<String>>, JsValue> {
    if columns.is_null() || columns.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(columns)
        .map(Some)
        .map_err(|e| JsExcellenceError::from_error("INVALID_COLUMNS", e))
}

/// 1-based column index to its letter label (1 -> "A", 27 -> "AA")
#[wasm_bindgen(js_name = columnLabel)]
pub fn column_label(index: u32) -> Result<String, JsValue> {
    core_column_label(index).map_err(to_js_error)
}

/// Parse an anchor address; no address resolves to A1
#[wasm_bindgen(js_name = resolveAnchor)]
pub fn resolve_anchor(address: Option<String>) -> Result<JsValue, JsValue> {
    core_resolve_anchor(address.as_deref())
        .map(|anchor| to_js(&anchor))
        .map_err(to_js_error)
}

/// Coerce any JS value into a cell-safe string, number or boolean
#[wasm_bindgen(js_name = sanitizeValue)]
pub fn sanitize_value(value: JsValue) -> JsValue {
    to_js(&core_sanitize_value(&raw_from_js(&value)))
}

/// Plan where records go and what values they become.
///
/// `columns` may be `undefined` to use the first record's key order; `anchor`
/// may be `undefined` to start at A1.
#[wasm_bindgen(js_name = buildWriteInstruction)]
pub fn build_write_instruction(
    records: JsValue,
    columns: JsValue,
    anchor: Option<String>,
) -> Result<JsValue, JsValue> {
    let records = records_from_js(&records).map_err(to_js_error)?;
    let columns = columns_from_js(columns)?;

    let plan = excellence_core::build_write_instruction(&records, columns.as_deref(), anchor.as_deref())
        .map_err(to_js_error)?;

    Ok(to_js(&WriteInstructionData::from(plan)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertResult {
    address: String,
    record_count: usize,
}

/// Plan and apply a record write through host callbacks.
///
/// `write_range(address, values)` receives the header row, then the data
/// rows. `format_header(address, style)` is optional. Nothing is written when
/// planning fails.
#[wasm_bindgen(js_name = insertRecords)]
pub fn insert_records(
    records: JsValue,
    columns: JsValue,
    anchor: Option<String>,
    write_range: &Function,
    format_header: Option<Function>,
) -> Result<JsValue, JsValue> {
    let records = records_from_js(&records).map_err(to_js_error)?;
    let columns = columns_from_js(columns)?;

    let mut host = CallbackHost::new(write_range, format_header.as_ref());
    let report = write_records(
        &mut host,
        &records,
        columns.as_deref(),
        anchor.as_deref(),
        Some(&HeaderStyle::DATA),
    )
    .map_err(|err| match err {
        InsertError::Plan(e) => to_js_error(e),
        InsertError::Host(e) => JsExcellenceError::from_error("HOST_ERROR", e),
    })?;

    Ok(to_js(&InsertResult {
        address: report.region.to_a1(),
        record_count: report.records,
    }))
}

/// =PC.AGGIRR(expected_future_value, original_beginning_value)
#[wasm_bindgen]
pub fn aggirr(expected_future_value: JsValue, original_beginning_value: JsValue) -> JsValue {
    let args = [
        Arg::Value(core_sanitize_value(&raw_from_js(&expected_future_value))),
        Arg::Value(core_sanitize_value(&raw_from_js(&original_beginning_value))),
    ];
    to_js(&excellence_functions::functions::finance::aggirr(&args))
}

/// =PC.JOINCELLS(range, [delimiter])
#[wasm_bindgen]
pub fn joincells(range: JsValue, delimiter: Option<String>) -> JsValue {
    let mut args = vec![Arg::Range(grid_from_js(&range))];
    if let Some(d) = delimiter {
        args.push(Arg::Value(d.into()));
    }
    to_js(&excellence_functions::functions::text::joincells(&args))
}

/// Custom-functions metadata (`functions.json`)
#[wasm_bindgen(js_name = functionsMetadata)]
pub fn functions_metadata() -> JsValue {
    to_js(&excellence_functions::manifest())
}

fn current_hostname() -> Option<String> {
    web_sys::window().and_then(|w| w.location().hostname().ok())
}

/// Backend and asset URLs for the page this add-in is served from.
///
/// Pass a hostname to override detection.
#[wasm_bindgen(js_name = environmentConfig)]
pub fn environment_config(hostname: Option<String>) -> JsValue {
    let hostname = hostname.or_else(current_hostname);
    let detection = Environment::detect(hostname.as_deref());

    #[cfg(target_arch = "wasm32")]
    if detection.unknown_host {
        web_sys::console::warn_1(
            &format!(
                "Unknown hostname: {}, defaulting to development environment",
                hostname.as_deref().unwrap_or("N/A")
            )
            .into(),
        );
    }

    let config: EnvironmentConfig = detection.environment.config();

    #[cfg(target_arch = "wasm32")]
    if config.environment == Environment::Development {
        web_sys::console::log_1(
            &format!(
                "Excel Add-in Environment Configuration: {} api={} manifest={} assets={} hostname={}",
                config.environment,
                config.api_base_url,
                config.manifest_url,
                config.asset_base_url,
                hostname.as_deref().unwrap_or("N/A")
            )
            .into(),
        );
    }

    to_js(&config)
}
