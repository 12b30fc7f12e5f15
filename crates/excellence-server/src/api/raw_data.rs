use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{date_range, required, Batch, DownloadResponse, ListResponse};
use crate::error::AppError;
use crate::repo::funds::has_fund_filtering;
use crate::repo::RawDataQuery;
use crate::AppState;

/// Request to download raw data
#[derive(Debug, Deserialize)]
pub struct RawDataDownloadRequest {
    pub catalog: Option<String>,
    pub fund: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub batch_size: Option<usize>,
    pub batch_id: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FundsResponse {
    success: bool,
    data: Vec<String>,
    fund_filtering_available: bool,
}

/// List raw data tables
async fn list_categories(State(state): State<AppState>) -> Json<ListResponse> {
    ListResponse::new(state.raw_data.categories())
}

/// List the funds of a catalog; catalogs without a fund column get none
async fn list_funds(
    State(state): State<AppState>,
    Path(catalog): Path<String>,
) -> Json<FundsResponse> {
    if !has_fund_filtering(&catalog) {
        return Json(FundsResponse {
            success: true,
            data: vec![],
            fund_filtering_available: false,
        });
    }

    Json(FundsResponse {
        success: true,
        data: state.raw_data.funds(&catalog),
        fund_filtering_available: true,
    })
}

/// Download raw data, whole or one batch at a time
async fn download(
    State(state): State<AppState>,
    payload: Result<Json<RawDataDownloadRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;

    let catalog = required(&req.catalog, "catalog")?;
    let start = required(&req.start_date, "start_date")?;
    let end = required(&req.end_date, "end_date")?;

    let fund = req.fund.clone().unwrap_or_default();
    if has_fund_filtering(catalog) && fund.is_empty() {
        return Err(AppError::BadRequest(
            "Fund is required for this catalog".to_string(),
        ));
    }

    let (start_date, end_date) = date_range(start, end)?;
    let query = RawDataQuery {
        catalog: catalog.to_string(),
        fund,
        start_date,
        end_date,
    };

    let rows = state.raw_data.raw_data(&query);
    tracing::info!(
        catalog = %query.catalog,
        fund = %query.fund,
        rows = rows.len(),
        "Raw data download"
    );

    match req.batch_id {
        Some(batch_id) => Ok(Json(Batch::slice(rows, req.batch_size, batch_id)?).into_response()),
        None => Ok(Json(DownloadResponse {
            success: true,
            count: rows.len(),
            columns: None,
            data: rows,
        })
        .into_response()),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/raw-data/categories", get(list_categories))
        .route("/api/raw-data/funds/:catalog", get(list_funds))
        .route("/api/raw-data/download", post(download))
}
