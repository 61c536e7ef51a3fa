// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Local;

use crate::{common::error::AppError, config::AppState};

// GET /api/dashboard/summary
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let summary = app_state.dashboard_service.get_summary(today);
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/departments
pub async fn get_departments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let headcount = app_state.dashboard_service.headcount_by_department();
    Ok((StatusCode::OK, Json(headcount)))
}
