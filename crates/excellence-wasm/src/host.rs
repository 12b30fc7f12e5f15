use excellence_core::{CellValue, HeaderStyle, HostError, RangeHost, Region};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::convert::to_js;

/// [`RangeHost`] backed by JavaScript callbacks.
///
/// The taskpane passes `writeRange(address, values)` and, optionally,
/// `formatHeader(address, style)`. Both queue work on the Office.js request
/// context; the caller runs `context.sync()` afterwards.
pub struct CallbackHost<'a> {
    write: &'a Function,
    format: Option<&'a Function>,
}

impl<'a> CallbackHost<'a> {
    pub fn new(write: &'a Function, format: Option<&'a Function>) -> Self {
        Self { write, format }
    }
}

/// Header style with CSS colours, ready for `range.format`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StyleData {
    bold: bool,
    fill: String,
    font_color: String,
}

impl From<&HeaderStyle> for StyleData {
    fn from(style: &HeaderStyle) -> Self {
        StyleData {
            bold: style.bold,
            fill: style.fill.to_hex(),
            font_color: style.font_color.to_hex(),
        }
    }
}

fn rejected(region: &Region, err: JsValue) -> HostError {
    let reason = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "host callback threw".to_string());
    HostError::Rejected {
        region: region.to_a1(),
        reason,
    }
}

impl RangeHost for CallbackHost<'_> {
    fn write_range(&mut self, region: &Region, grid: &[Vec<CellValue>]) -> Result<(), HostError> {
        self.write
            .call2(&JsValue::NULL, &JsValue::from_str(&region.to_a1()), &to_js(grid))
            .map(|_| ())
            .map_err(|e| rejected(region, e))
    }

    fn format_header(&mut self, region: &Region, style: &HeaderStyle) -> Result<(), HostError> {
        let Some(format) = self.format else {
            return Ok(());
        };
        format
            .call2(&JsValue::NULL, &JsValue::from_str(&region.to_a1()), &to_js(&StyleData::from(style)))
            .map(|_| ())
            .map_err(|e| rejected(region, e))
    }
}
