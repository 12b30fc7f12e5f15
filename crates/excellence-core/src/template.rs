use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cell::CellValue;
use crate::error::{HostError, WriteError};
use crate::format::HeaderStyle;
use crate::host::RangeHost;
use crate::range::{Anchor, Region};
use crate::record::Record;
use crate::value::RawValue;

/// Columns of every upload template sheet
pub const TEMPLATE_HEADERS: [&str; 5] = ["Security", "Cost", "Performance", "Date", "Identifier"];

/// The kinds of data a user can upload from a template sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadKind {
    #[serde(rename = "Windmill Statistics")]
    WindmillStatistics,
    #[serde(rename = "Financial Outperformance")]
    FinancialOutperformance,
    #[serde(rename = "Excellence Accounting")]
    ExcellenceAccounting,
}

impl UploadKind {
    pub const ALL: [UploadKind; 3] = [
        UploadKind::WindmillStatistics,
        UploadKind::FinancialOutperformance,
        UploadKind::ExcellenceAccounting,
    ];

    /// Sheet name used for this kind's template
    pub fn sheet_name(&self) -> &'static str {
        match self {
            UploadKind::WindmillStatistics => "Windmill Statistics",
            UploadKind::FinancialOutperformance => "Financial Outperformance",
            UploadKind::ExcellenceAccounting => "Excellence Accounting",
        }
    }

    /// Identifier the backend lists this kind under
    pub fn id(&self) -> &'static str {
        match self {
            UploadKind::WindmillStatistics => "windmill_statistics",
            UploadKind::FinancialOutperformance => "financial_outperformance",
            UploadKind::ExcellenceAccounting => "excellence_accounting",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UploadKind::WindmillStatistics => "Statistical data for windmill performance analysis",
            UploadKind::FinancialOutperformance => "Financial performance comparison data",
            UploadKind::ExcellenceAccounting => "Accounting excellence metrics and data",
        }
    }

    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.sheet_name() == name)
    }
}

/// Write the template header row at A1 of `host` and style it.
pub fn generate_template<H: RangeHost + ?Sized>(host: &mut H) -> Result<Region, HostError> {
    let region = Region::spanning(Anchor::default(), 1, TEMPLATE_HEADERS.len() as u32);
    let header: Vec<CellValue> = TEMPLATE_HEADERS.iter().map(|h| CellValue::from(*h)).collect();

    host.write_range(&region, &[header])?;
    host.format_header(&region, &HeaderStyle::TEMPLATE)?;
    host.autofit_columns()?;

    Ok(region)
}

/// Turn a used range (header row followed by data rows) into records.
///
/// Fails with [`WriteError::EmptyInput`] when there is no data below the
/// header. Short rows are padded with nulls.
pub fn read_upload(grid: &[Vec<CellValue>]) -> Result<Vec<Record>, WriteError> {
    let Some((header, rows)) = grid.split_first() else {
        return Err(WriteError::EmptyInput);
    };
    if rows.is_empty() {
        return Err(WriteError::EmptyInput);
    }

    let names: Vec<String> = header.iter().map(CellValue::as_text).collect();

    Ok(rows
        .iter()
        .map(|row| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row.get(i).map(RawValue::from).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect()
        })
        .collect())
}

/// Body sent to the ingestion endpoint for an upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub data_type: UploadKind,
    pub skip_duplicate_check: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    pub data: Vec<Map<String, Value>>,
}

impl UploadPayload {
    pub fn new(
        kind: UploadKind,
        records: &[Record],
        skip_duplicate_check: bool,
        delivery_date: Option<NaiveDate>,
    ) -> Self {
        UploadPayload {
            data_type: kind,
            skip_duplicate_check,
            delivery_date,
            data: records.iter().map(Record::to_json).collect(),
        }
    }
}
