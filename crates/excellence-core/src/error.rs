use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Represents possible cell errors (Excel-compatible)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellError {
    /// #DIV/0! - Division by zero
    DivisionByZero,
    /// #VALUE! - Invalid value type
    InvalidValue,
    /// #NAME? - Unrecognized function or name
    InvalidName,
    /// #NUM! - Invalid numeric value
    NumError,
    /// #N/A - Value not available
    NotAvailable,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::DivisionByZero => write!(f, "#DIV/0!"),
            CellError::InvalidValue => write!(f, "#VALUE!"),
            CellError::InvalidName => write!(f, "#NAME?"),
            CellError::NumError => write!(f, "#NUM!"),
            CellError::NotAvailable => write!(f, "#N/A"),
        }
    }
}

/// Errors raised while planning a range write.
///
/// A write that fails with any of these has not touched the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    #[error("No data to insert")]
    EmptyInput,

    #[error("Invalid cell address: {0:?}")]
    InvalidAddress(String),

    #[error("Invalid column index: {0}")]
    InvalidColumn(u32),

    #[error("Malformed records: {0}")]
    MalformedRecords(String),
}

impl WriteError {
    /// Stable error code for the JavaScript side
    pub fn code(&self) -> &'static str {
        match self {
            WriteError::EmptyInput => "EMPTY_INPUT",
            WriteError::InvalidAddress(_) => "INVALID_ADDRESS",
            WriteError::InvalidColumn(_) => "INVALID_COLUMN",
            WriteError::MalformedRecords(_) => "MALFORMED_RECORDS",
        }
    }
}

/// Failure reported by a [`RangeHost`](crate::host::RangeHost) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Host rejected write to {region}: {reason}")]
    Rejected { region: String, reason: String },

    #[error("Grid shape {rows}x{cols} does not match region {region}")]
    ShapeMismatch {
        region: String,
        rows: usize,
        cols: usize,
    },

    #[error("Host unavailable: {0}")]
    Unavailable(String),
}

/// Any failure of a planned-then-applied write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error(transparent)]
    Plan(#[from] WriteError),

    #[error(transparent)]
    Host(#[from] HostError),
}
