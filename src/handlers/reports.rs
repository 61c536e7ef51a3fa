// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{common::error::AppError, config::AppState, models::report::RangeQuery};

// GET /api/reports/records?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn records(
    State(app_state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .report_service
        .records_in_range(range.start, range.end)?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/reports/summary?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn summary(
    State(app_state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .report_service
        .summary_in_range(range.start, range.end)?;
    Ok((StatusCode::OK, Json(summary)))
}
