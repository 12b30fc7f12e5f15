use serde::Serialize;

use crate::cell::CellValue;
use crate::error::WriteError;
use crate::range::{resolve_anchor, Anchor, Region, MAX_COLUMNS, MAX_ROWS};
use crate::record::Record;
use crate::value::{normalize_date_text, sanitize_value, RawValue};

/// Column whose text values are truncated to calendar dates
pub const DATE_COLUMN: &str = "date";

/// Everything needed to place a record set into the host: where the header
/// and data go, and the values for each.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteInstruction {
    pub header_region: Region,
    pub data_region: Region,
    pub header_row: Vec<String>,
    pub data_rows: Vec<Vec<CellValue>>,
}

impl WriteInstruction {
    /// Header and data together, e.g. C5:D7
    pub fn full_region(&self) -> Region {
        Region {
            start: self.header_region.start,
            end: self.data_region.end,
        }
    }

    pub fn record_count(&self) -> usize {
        self.data_rows.len()
    }

    /// Header row as a single-row grid
    pub fn header_grid(&self) -> Vec<Vec<CellValue>> {
        vec![self
            .header_row
            .iter()
            .map(|h| CellValue::Text(h.clone()))
            .collect()]
    }
}

/// Plan the write of `records` starting at `anchor` (A1 when absent).
///
/// Column order is `columns` when given and non-empty, otherwise the key
/// order of the first record. Keys missing from a record are written empty.
pub fn build_write_instruction(
    records: &[Record],
    columns: Option<&[String]>,
    anchor: Option<&str>,
) -> Result<WriteInstruction, WriteError> {
    let anchor = resolve_anchor(anchor)?;
    build_write_instruction_at(records, columns, anchor)
}

/// [`build_write_instruction`] with an already resolved anchor.
pub fn build_write_instruction_at(
    records: &[Record],
    columns: Option<&[String]>,
    anchor: Anchor,
) -> Result<WriteInstruction, WriteError> {
    let first = records.first().ok_or(WriteError::EmptyInput)?;

    let header_row: Vec<String> = match columns {
        Some(cols) if !cols.is_empty() => cols.to_vec(),
        _ => first.keys().map(str::to_string).collect(),
    };
    if header_row.is_empty() {
        return Err(WriteError::EmptyInput);
    }

    let width = count(header_row.len());
    let height = count(records.len());

    let header_region = Region::spanning(anchor, 1, width);
    let data_start = Anchor::new(anchor.column, anchor.row.saturating_add(1));
    let data_region = Region::spanning(data_start, height, width);
    if header_region.end.column > MAX_COLUMNS || data_region.end.row > MAX_ROWS {
        return Err(WriteError::InvalidAddress(anchor.to_a1()));
    }

    let data_rows = records
        .iter()
        .map(|record| {
            header_row
                .iter()
                .map(|column| cell_for(column, record.get(column)))
                .collect()
        })
        .collect();

    Ok(WriteInstruction {
        header_region,
        data_region,
        header_row,
        data_rows,
    })
}

fn cell_for(column: &str, value: Option<&RawValue>) -> CellValue {
    match value {
        None => CellValue::Empty,
        Some(RawValue::Text(s)) if column.eq_ignore_ascii_case(DATE_COLUMN) => {
            CellValue::Text(normalize_date_text(s).unwrap_or_else(|| s.clone()))
        }
        Some(v) => sanitize_value(v),
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new().with("date", "2024-01-01").with("value", 100.0),
            Record::new()
                .with("date", "2024-01-02")
                .with("value", RawValue::Null),
        ]
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(
            build_write_instruction(&[], None, None),
            Err(WriteError::EmptyInput)
        );
        assert_eq!(
            build_write_instruction(&[], None, Some("C5")),
            Err(WriteError::EmptyInput)
        );
    }

    #[test]
    fn test_header_and_rows_follow_first_record() {
        let plan = build_write_instruction(&sample(), None, None).unwrap();

        assert_eq!(plan.header_row, vec!["date", "value"]);
        assert_eq!(
            plan.data_rows,
            vec![
                vec![CellValue::from("2024-01-01"), CellValue::Number(100.0)],
                vec![CellValue::from("2024-01-02"), CellValue::Empty],
            ]
        );
        assert_eq!(plan.header_region.to_a1(), "A1:B1");
        assert_eq!(plan.data_region.to_a1(), "A2:B3");
    }

    #[test]
    fn test_anchor_offsets_both_regions() {
        let plan = build_write_instruction(&sample(), None, Some("C5")).unwrap();

        assert_eq!(plan.header_region.start, Anchor::new(3, 5));
        assert_eq!(plan.header_region.end, Anchor::new(4, 5));
        assert_eq!(plan.data_region.start, Anchor::new(3, 6));
        assert_eq!(plan.data_region.end, Anchor::new(4, 7));
        assert_eq!(plan.data_region.to_a1(), "C6:D7");
        assert_eq!(plan.full_region().to_a1(), "C5:D7");
    }

    #[test]
    fn test_malformed_anchor_is_rejected() {
        assert_eq!(
            build_write_instruction(&sample(), None, Some("5A")),
            Err(WriteError::InvalidAddress("5A".into()))
        );
    }

    #[test]
    fn test_write_past_sheet_edge_is_rejected() {
        // Two columns from the last column
        assert_eq!(
            build_write_instruction(&sample(), None, Some("XFD1")),
            Err(WriteError::InvalidAddress("XFD1".into()))
        );
        // Header fits on the last row, data would not
        assert_eq!(
            build_write_instruction(&sample(), None, Some("A1048576")),
            Err(WriteError::InvalidAddress("A1048576".into()))
        );
    }

    #[test]
    fn test_write_touching_sheet_edge_is_planned() {
        let plan = build_write_instruction(&sample(), None, Some("XFC1048573")).unwrap();
        assert_eq!(plan.full_region().to_a1(), "XFC1048573:XFD1048575");
        assert!(Anchor::parse(&plan.data_region.end.to_a1()).is_ok());

        let records = vec![Record::new().with("value", 1.0)];
        let plan = build_write_instruction(&records, None, Some("XFD1048575")).unwrap();
        assert_eq!(plan.data_region.to_a1(), "XFD1048576");
    }

    #[test]
    fn test_explicit_columns_win_and_missing_keys_are_empty() {
        let columns = vec!["value".to_string(), "currency".to_string()];
        let plan = build_write_instruction(&sample(), Some(columns.as_slice()), None).unwrap();

        assert_eq!(plan.header_row, columns);
        assert_eq!(plan.data_rows[0], vec![CellValue::Number(100.0), CellValue::Empty]);
        assert_eq!(plan.data_rows[1], vec![CellValue::Empty, CellValue::Empty]);
    }

    #[test]
    fn test_empty_column_list_falls_back_to_keys() {
        let plan = build_write_instruction(&sample(), Some(&[][..]), None).unwrap();
        assert_eq!(plan.header_row, vec!["date", "value"]);
    }

    #[test]
    fn test_record_without_fields_is_empty_input() {
        assert_eq!(
            build_write_instruction(&[Record::new()], None, None),
            Err(WriteError::EmptyInput)
        );
    }

    #[test]
    fn test_later_records_are_read_in_first_record_order() {
        let records = vec![
            Record::new().with("a", 1.0).with("b", 2.0),
            Record::new().with("b", 4.0).with("a", 3.0),
        ];
        let plan = build_write_instruction(&records, None, None).unwrap();
        assert_eq!(
            plan.data_rows[1],
            vec![CellValue::Number(3.0), CellValue::Number(4.0)]
        );
    }

    #[test]
    fn test_date_column_timestamps_are_truncated() {
        let records = vec![
            Record::new().with("Date", "2024-01-05T00:00:00"),
            Record::new().with("Date", "n/a"),
        ];
        let plan = build_write_instruction(&records, None, None).unwrap();
        assert_eq!(plan.data_rows[0][0], CellValue::from("2024-01-05"));
        assert_eq!(plan.data_rows[1][0], CellValue::from("n/a"));
    }

    #[test]
    fn test_serialized_shape() {
        let plan = build_write_instruction(&sample(), None, None).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["headerRow"], serde_json::json!(["date", "value"]));
        assert_eq!(json["dataRows"][1][1], serde_json::json!(""));
        assert_eq!(json["dataRegion"]["start"]["row"], serde_json::json!(2));
    }
}
