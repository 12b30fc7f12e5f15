use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use excellence_core::UploadKind;

use crate::error::AppError;
use crate::repo::upload::{IngestBatch, IngestConfiguration, UPLOAD_SOURCE};
use crate::repo::DataRow;
use crate::AppState;

/// Key added to every uploaded record
pub const METADATA_KEY: &str = "_upload_metadata";

#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    message: String,
    record_count: usize,
    data_type: String,
    nifi_response_status: u16,
}

#[derive(Debug, Serialize)]
struct UploadType {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct UploadTypesResponse {
    success: bool,
    upload_types: Vec<UploadType>,
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

/// Validate an upload, tag each record and forward the batch.
async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let Json(body) = payload?;
    let request = match body {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(bad_request("No data provided")),
    };

    let data_type = match request.get("dataType") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(bad_request("Data type is required")),
    };
    let skip_duplicate_check = request
        .get("skipDuplicateCheck")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let delivery_date = request.get("deliveryDate").cloned().unwrap_or(Value::Null);
    let data = match request.get("data") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(bad_request("Data array is required and must be non-empty")),
    };

    tracing::info!(data_type = %data_type, records = data.len(), "Processing data upload");

    let uploaded_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
    let records = data
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let Value::Object(fields) = item else {
                return Err(bad_request(format!("Invalid record format at index {}", i)));
            };
            let mut record: DataRow = fields.clone();
            record.insert(
                METADATA_KEY.to_string(),
                json!({
                    "upload_timestamp": uploaded_at,
                    "data_type": data_type,
                    "skip_duplicate_check": skip_duplicate_check,
                    "delivery_date": delivery_date,
                    "record_index": i,
                }),
            );
            Ok(record)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let batch = IngestBatch {
        source: UPLOAD_SOURCE,
        upload_timestamp: uploaded_at,
        data_type: data_type.clone(),
        configuration: IngestConfiguration {
            skip_duplicate_check,
            delivery_date,
        },
        record_count: records.len(),
        records,
    };

    let status = state.upload_sink.forward(&batch).map_err(|err| {
        tracing::error!(error = ?err, "Forwarding upload failed");
        AppError::from(err)
    })?;
    tracing::info!("Forwarded {} records", batch.record_count);

    Ok(Json(UploadResponse {
        success: true,
        message: format!("Successfully uploaded {} records", batch.record_count),
        record_count: batch.record_count,
        data_type,
        nifi_response_status: status,
    }))
}

/// Kinds of data the template sheets can upload
async fn upload_types() -> Json<UploadTypesResponse> {
    Json(UploadTypesResponse {
        success: true,
        upload_types: UploadKind::ALL
            .iter()
            .map(|kind| UploadType {
                id: kind.id(),
                name: kind.sheet_name(),
                description: kind.description(),
            })
            .collect(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/data-upload/upload", post(upload))
        .route("/api/data-upload/types", get(upload_types))
}
