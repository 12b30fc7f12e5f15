mod batch;
mod data_upload;
mod health;
mod market_data;
mod raw_data;

use axum::{http::Uri, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::repo::DataRow;
use crate::AppState;

pub use batch::{Batch, DEFAULT_BATCH_SIZE};

/// Create the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(raw_data::router())
        .merge(market_data::router())
        .merge(data_upload::router())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    tracing::debug!("No route for {}", uri);
    AppError::NotFound("Endpoint not found".to_string())
}

/// Value of a required request field, or a 400 naming it
fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .ok_or_else(|| AppError::BadRequest(format!("Missing required field: {}", name)))
}

/// Parse an ISO date or timestamp into a calendar date
fn parse_date(value: &str, name: &str) -> Result<NaiveDate, AppError> {
    excellence_core::value::normalize_date_text(value)
        .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date for {}: {}", name, value)))
}

/// Parse and order-check a start/end pair
fn date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start_date = parse_date(start, "start_date")?;
    let end_date = parse_date(end, "end_date")?;
    if start_date > end_date {
        return Err(AppError::BadRequest(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok((start_date, end_date))
}

/// Dropdown contents
#[derive(Debug, Serialize)]
struct ListResponse {
    success: bool,
    data: Vec<String>,
}

impl ListResponse {
    fn new(data: Vec<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// A whole (unbatched) download
#[derive(Debug, Serialize)]
struct DownloadResponse {
    success: bool,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<String>>,
    data: Vec<DataRow>,
}
