//! Function lookup and the custom-functions metadata the host loads at
//! startup.

use serde::Serialize;
use thiserror::Error;

use excellence_core::CellValue;

use crate::functions;
use crate::Arg;

/// Namespace the functions are registered under (`=PC.AGGIRR(...)`)
pub const NAMESPACE: &str = "PC";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}

/// Call a custom function by name (case-insensitive, namespace optional).
pub fn call(name: &str, args: &[Arg]) -> Result<CellValue, FunctionError> {
    let upper = name.trim().to_uppercase();
    let bare = upper
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(&upper);

    match bare {
        "AGGIRR" => Ok(functions::finance::aggirr(args)),
        "JOINCELLS" => Ok(functions::text::joincells(args)),
        _ => Err(FunctionError::UnknownFunction(name.to_string())),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionsManifest {
    pub functions: Vec<FunctionMetadata>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterMetadata>,
    pub result: ResultMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterMetadata {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultMetadata {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

fn scalar(name: &'static str, description: &'static str, kind: &'static str) -> ParameterMetadata {
    ParameterMetadata {
        name,
        description,
        kind,
        dimensionality: None,
        optional: false,
    }
}

/// Metadata for every function, in the shape of the host's `functions.json`
pub fn manifest() -> FunctionsManifest {
    FunctionsManifest {
        functions: vec![
            FunctionMetadata {
                id: "AGGIRR",
                name: "AGGIRR",
                description: "Calculates aggregate IRR by dividing expected future value by original beginning value",
                parameters: vec![
                    scalar("expectedFutureValue", "The expected future value", "number"),
                    scalar("originalBeginningValue", "The original beginning value", "number"),
                ],
                result: ResultMetadata { kind: "number" },
            },
            FunctionMetadata {
                id: "JOINCELLS",
                name: "JOINCELLS",
                description: "Joins cells from a range into a single string with specified delimiter",
                parameters: vec![
                    ParameterMetadata {
                        dimensionality: Some("matrix"),
                        ..scalar("range", "The range of cells to join", "any")
                    },
                    ParameterMetadata {
                        optional: true,
                        ..scalar("delimiter", "The delimiter to use (default comma)", "string")
                    },
                ],
                result: ResultMetadata { kind: "string" },
            },
        ],
    }
}
