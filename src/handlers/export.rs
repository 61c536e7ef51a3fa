// src/handlers/export.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{common::error::AppError, config::AppState, services::export_service::ExportService};

// GET /api/export
pub async fn export_data(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let now = Utc::now();
    let body = app_state.export_service.export_json(now)?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", ExportService::file_name(now)),
        ),
    ];

    Ok((headers, body).into_response())
}
