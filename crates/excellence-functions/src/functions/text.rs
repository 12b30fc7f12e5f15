use excellence_core::{CellError, CellValue};

use crate::Arg;

/// Delimiter used when JOINCELLS is called without one
pub const DEFAULT_DELIMITER: &str = ",";

/// JOINCELLS - Join the non-blank cells of a range, row by row.
///
/// Booleans join as `true`/`false`, the way the task pane stringifies them.
pub fn joincells(args: &[Arg]) -> CellValue {
    let cells: Vec<&CellValue> = match args.first() {
        Some(Arg::Range(rows)) => rows.iter().flatten().collect(),
        Some(Arg::Value(v)) => vec![v],
        None => return CellValue::Error(CellError::InvalidValue),
    };

    let delimiter = match args.get(1) {
        None | Some(Arg::Value(CellValue::Empty)) => DEFAULT_DELIMITER.to_string(),
        Some(Arg::Value(CellValue::Error(e))) => return CellValue::Error(e.clone()),
        Some(Arg::Value(v)) => v.as_text(),
        Some(Arg::Range(_)) => return CellValue::Error(CellError::InvalidValue),
    };

    let mut parts = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            CellValue::Error(e) => return CellValue::Error(e.clone()),
            c if c.is_blank() => {}
            CellValue::Boolean(b) => parts.push(b.to_string()),
            c => parts.push(c.as_text()),
        }
    }

    CellValue::Text(parts.join(delimiter.as_str()))
}
