//! The seam between write planning and the spreadsheet that executes it.

use std::collections::HashMap;

use crate::cell::CellValue;
use crate::error::{HostError, InsertError};
use crate::format::HeaderStyle;
use crate::range::{Anchor, Region};
use crate::record::Record;
use crate::writer::build_write_instruction;

/// A spreadsheet that can receive values.
///
/// In the add-in this is the Office.js range API; here it is whatever the
/// caller injects. Implementations decide whether concurrent writes are
/// allowed.
///
/// [`write_records`] issues several calls and stops at the first error, so
/// a host that must not show a partial write should queue calls and apply
/// them on a separate commit (Office.js does this with `context.sync()`).
/// Hosts that apply each call immediately, like [`MemorySheet`], keep the
/// header row when the data write fails.
pub trait RangeHost {
    /// Place `grid` into `region`. The grid is row-major and must match the
    /// region's shape.
    fn write_range(&mut self, region: &Region, grid: &[Vec<CellValue>]) -> Result<(), HostError>;

    /// Style a header row. Hosts without formatting ignore this.
    fn format_header(&mut self, _region: &Region, _style: &HeaderStyle) -> Result<(), HostError> {
        Ok(())
    }

    /// Resize columns to fit their contents.
    fn autofit_columns(&mut self) -> Result<(), HostError> {
        Ok(())
    }
}

/// What a completed write covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    pub region: Region,
    pub records: usize,
}

/// Plan and apply a record write: header, then data, then header styling.
///
/// Planning errors are returned before the host is touched.
pub fn write_records<H: RangeHost + ?Sized>(
    host: &mut H,
    records: &[Record],
    columns: Option<&[String]>,
    anchor: Option<&str>,
    style: Option<&HeaderStyle>,
) -> Result<WriteReport, InsertError> {
    let plan = build_write_instruction(records, columns, anchor)?;

    host.write_range(&plan.header_region, &plan.header_grid())?;
    host.write_range(&plan.data_region, &plan.data_rows)?;

    if let Some(style) = style {
        host.format_header(&plan.header_region, style)?;
    }
    host.autofit_columns()?;

    Ok(WriteReport {
        region: plan.full_region(),
        records: plan.record_count(),
    })
}

pub(crate) fn check_shape(region: &Region, grid: &[Vec<CellValue>]) -> Result<(), HostError> {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    let fits = rows == region.row_count() as usize
        && grid.iter().all(|row| row.len() == region.col_count() as usize);

    if fits {
        Ok(())
    } else {
        Err(HostError::ShapeMismatch {
            region: region.to_a1(),
            rows,
            cols,
        })
    }
}

/// Sparse in-memory worksheet implementing [`RangeHost`].
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    pub name: String,
    cells: HashMap<Anchor, CellValue>,
    header_styles: Vec<(Region, HeaderStyle)>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        MemorySheet {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value at a cell; unset cells are empty
    pub fn get(&self, cell: Anchor) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(&cell).unwrap_or(&EMPTY)
    }

    /// Value at an A1 address
    pub fn get_a1(&self, address: &str) -> Option<&CellValue> {
        Anchor::parse(address).ok().map(|cell| self.get(cell))
    }

    pub fn set(&mut self, cell: Anchor, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value);
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest region covering every non-empty cell
    pub fn used_range(&self) -> Option<Region> {
        let mut cells = self.cells.keys();
        let first = *cells.next()?;
        let (mut min, mut max) = (first, first);
        for cell in cells {
            min.column = min.column.min(cell.column);
            min.row = min.row.min(cell.row);
            max.column = max.column.max(cell.column);
            max.row = max.row.max(cell.row);
        }
        Some(Region {
            start: min,
            end: max,
        })
    }

    /// Values of a region as a row-major grid
    pub fn read_range(&self, region: &Region) -> Vec<Vec<CellValue>> {
        (region.start.row..=region.end.row)
            .map(|row| {
                (region.start.column..=region.end.column)
                    .map(|column| self.get(Anchor::new(column, row)).clone())
                    .collect()
            })
            .collect()
    }

    /// Style applied to the header row containing `cell`, if any
    pub fn header_style_at(&self, cell: Anchor) -> Option<&HeaderStyle> {
        self.header_styles
            .iter()
            .rev()
            .find(|(region, _)| region.contains(cell))
            .map(|(_, style)| style)
    }
}

impl RangeHost for MemorySheet {
    fn write_range(&mut self, region: &Region, grid: &[Vec<CellValue>]) -> Result<(), HostError> {
        check_shape(region, grid)?;
        for (cell, value) in region.iter().zip(grid.iter().flatten()) {
            self.set(cell, value.clone());
        }
        Ok(())
    }

    fn format_header(&mut self, region: &Region, style: &HeaderStyle) -> Result<(), HostError> {
        self.header_styles.push((*region, *style));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WriteError;
    use crate::value::RawValue;

    fn records() -> Vec<Record> {
        vec![
            Record::new().with("date", "2024-01-01").with("value", 100.0),
            Record::new()
                .with("date", "2024-01-02")
                .with("value", RawValue::Null),
        ]
    }

    #[test]
    fn test_write_records_at_anchor() {
        let mut sheet = MemorySheet::new("Sheet1");
        let report =
            write_records(&mut sheet, &records(), None, Some("C5"), Some(&HeaderStyle::DATA))
                .unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(report.region.to_a1(), "C5:D7");
        assert_eq!(sheet.get_a1("C5"), Some(&CellValue::from("date")));
        assert_eq!(sheet.get_a1("D5"), Some(&CellValue::from("value")));
        assert_eq!(sheet.get_a1("D6"), Some(&CellValue::Number(100.0)));
        assert_eq!(sheet.get_a1("D7"), Some(&CellValue::Empty));
        assert_eq!(sheet.used_range().map(|r| r.to_a1()), Some("C5:D7".into()));
        assert_eq!(
            sheet.header_style_at(Anchor::new(4, 5)),
            Some(&HeaderStyle::DATA)
        );
        assert_eq!(sheet.header_style_at(Anchor::new(4, 6)), None);
    }

    #[test]
    fn test_failed_plan_leaves_sheet_untouched() {
        let mut sheet = MemorySheet::new("Sheet1");

        let err = write_records(&mut sheet, &[], None, None, None).unwrap_err();
        assert_eq!(err, InsertError::Plan(WriteError::EmptyInput));

        let err = write_records(&mut sheet, &records(), None, Some("A"), None).unwrap_err();
        assert_eq!(
            err,
            InsertError::Plan(WriteError::InvalidAddress("A".into()))
        );
        assert!(sheet.is_empty());

        let err = write_records(&mut sheet, &records(), None, Some("XFD1"), None).unwrap_err();
        assert_eq!(
            err,
            InsertError::Plan(WriteError::InvalidAddress("XFD1".into()))
        );
        assert!(sheet.is_empty());
    }

    /// Buffers writes until `commit`, like an Office.js request context
    #[derive(Default)]
    struct QueuingHost {
        pending: Vec<(Region, Vec<Vec<CellValue>>)>,
        sheet: MemorySheet,
        reject_data: bool,
    }

    impl QueuingHost {
        fn commit(&mut self) {
            for (region, grid) in self.pending.drain(..) {
                self.sheet.write_range(&region, &grid).unwrap();
            }
        }
    }

    impl RangeHost for QueuingHost {
        fn write_range(&mut self, region: &Region, grid: &[Vec<CellValue>]) -> Result<(), HostError> {
            if self.reject_data && !self.pending.is_empty() {
                return Err(HostError::Unavailable("workbook is busy".into()));
            }
            self.pending.push((*region, grid.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_queued_host_commits_all_or_nothing() {
        let mut host = QueuingHost {
            reject_data: true,
            ..Default::default()
        };
        let err = write_records(&mut host, &records(), None, None, None).unwrap_err();
        assert!(matches!(err, InsertError::Host(HostError::Unavailable(_))));
        // The caller drops the batch instead of syncing it
        host.pending.clear();
        host.commit();
        assert!(host.sheet.is_empty());

        let mut host = QueuingHost::default();
        write_records(&mut host, &records(), None, None, None).unwrap();
        assert!(host.sheet.is_empty());
        host.commit();
        assert_eq!(host.sheet.used_range().map(|r| r.to_a1()), Some("A1:B3".into()));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mut sheet = MemorySheet::new("Sheet1");
        let region = Region::spanning(Anchor::new(1, 1), 1, 2);
        let err = sheet
            .write_range(&region, &[vec![CellValue::from("only one")]])
            .unwrap_err();
        assert!(matches!(err, HostError::ShapeMismatch { rows: 1, cols: 1, .. }));
    }

    struct RejectingHost;

    impl RangeHost for RejectingHost {
        fn write_range(&mut self, region: &Region, _grid: &[Vec<CellValue>]) -> Result<(), HostError> {
            Err(HostError::Rejected {
                region: region.to_a1(),
                reason: "sheet is protected".into(),
            })
        }
    }

    #[test]
    fn test_host_errors_propagate() {
        let err = write_records(&mut RejectingHost, &records(), None, None, None).unwrap_err();
        assert!(matches!(err, InsertError::Host(HostError::Rejected { .. })));
    }
}
