use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::{date_range, required, Batch, DownloadResponse, ListResponse};
use crate::error::AppError;
use crate::repo::MarketDataQuery;
use crate::AppState;

/// Request to download market data
#[derive(Debug, Deserialize)]
pub struct MarketDataDownloadRequest {
    pub security: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub batch_size: Option<usize>,
    pub batch_id: Option<usize>,
}

async fn list_securities(State(state): State<AppState>) -> Json<ListResponse> {
    ListResponse::new(state.market_data.securities())
}

async fn list_fields(
    State(state): State<AppState>,
    Path(security): Path<String>,
) -> Json<ListResponse> {
    ListResponse::new(state.market_data.fields(&security))
}

/// Download market data; whole downloads also report their column order
async fn download(
    State(state): State<AppState>,
    payload: Result<Json<MarketDataDownloadRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;

    let security = required(&req.security, "security")?;
    let field = required(&req.field, "field")?;
    let start = required(&req.start_date, "start_date")?;
    let end = required(&req.end_date, "end_date")?;

    let (start_date, end_date) = date_range(start, end)?;
    let query = MarketDataQuery {
        security: security.to_string(),
        field: field.to_string(),
        start_date,
        end_date,
    };

    let rows = state.market_data.market_data(&query);
    tracing::info!(
        security = %query.security,
        field = %query.field,
        rows = rows.len(),
        "Market data download"
    );

    if let Some(batch_id) = req.batch_id {
        return Ok(Json(Batch::slice(rows, req.batch_size, batch_id)?).into_response());
    }

    let columns = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();

    Ok(Json(DownloadResponse {
        success: true,
        count: rows.len(),
        columns: Some(columns),
        data: rows,
    })
    .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/market-data/securities", get(list_securities))
        .route("/api/market-data/fields/:security", get(list_fields))
        .route("/api/market-data/download", post(download))
}
