#![cfg(target_arch = "wasm32")]

use excellence_wasm::{build_write_instruction, column_label, joincells, sanitize_value};
use js_sys::{Array, Date, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn record(pairs: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (k, v) in pairs {
        Reflect::set(&obj, &JsValue::from_str(k), v).unwrap();
    }
    obj.into()
}

fn get(value: &JsValue, path: &[&str]) -> JsValue {
    path.iter().fold(value.clone(), |acc, key| {
        Reflect::get(&acc, &JsValue::from_str(key)).unwrap()
    })
}

#[wasm_bindgen_test]
fn column_labels() {
    assert_eq!(column_label(28).unwrap(), "AB");
    assert!(column_label(0).is_err());
}

#[wasm_bindgen_test]
fn dates_and_nan_are_sanitized() {
    let date = Date::new(&JsValue::from_str("2024-03-01"));
    assert_eq!(sanitize_value(date.into()).as_string().as_deref(), Some("2024-03-01"));
    assert_eq!(sanitize_value(JsValue::from_f64(f64::NAN)).as_string().as_deref(), Some(""));
    assert_eq!(sanitize_value(JsValue::UNDEFINED).as_string().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn write_instruction_from_js_records() {
    let records = Array::new();
    records.push(&record(&[
        ("date", "2024-01-01".into()),
        ("value", JsValue::from_f64(100.0)),
    ]));
    records.push(&record(&[("date", "2024-01-02".into()), ("value", JsValue::NULL)]));

    let plan = build_write_instruction(records.into(), JsValue::UNDEFINED, Some("C5".into())).unwrap();

    assert_eq!(
        get(&plan, &["headerRegion", "address"]).as_string().as_deref(),
        Some("C5:D5")
    );
    assert_eq!(
        get(&plan, &["dataRegion", "address"]).as_string().as_deref(),
        Some("C6:D7")
    );
    let rows = get(&plan, &["dataRows"]);
    let second: Array = Reflect::get(&rows, &JsValue::from(1)).unwrap().into();
    assert_eq!(second.get(1).as_string().as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn empty_records_report_structured_error() {
    let err = build_write_instruction(Array::new().into(), JsValue::UNDEFINED, None).unwrap_err();
    assert_eq!(get(&err, &["code"]).as_string().as_deref(), Some("EMPTY_INPUT"));
}

#[wasm_bindgen_test]
fn joincells_flattens_rows() {
    let row1 = Array::of2(&"a".into(), &JsValue::from_str(""));
    let row2 = Array::of2(&JsValue::from_f64(3.0), &"b".into());
    let range = Array::of2(&row1, &row2);
    assert_eq!(joincells(range.into(), Some("|".into())).as_string().as_deref(), Some("a|3|b"));
}
