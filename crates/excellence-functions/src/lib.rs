pub mod functions;
pub mod registry;

pub use registry::{call, manifest, FunctionError, FunctionsManifest, NAMESPACE};

use excellence_core::CellValue;

/// An argument as the host passes it to a custom function.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(CellValue),
    /// Row-major 2-D range
    Range(Vec<Vec<CellValue>>),
}

impl From<CellValue> for Arg {
    fn from(v: CellValue) -> Self {
        Arg::Value(v)
    }
}

impl From<Vec<Vec<CellValue>>> for Arg {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Arg::Range(rows)
    }
}
