// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::settings::SettingsPatch};

// GET /api/settings
pub async fn get_settings(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.settings.get())))
}

// PATCH /api/settings
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<SettingsPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.settings.update(payload)?;
    Ok((StatusCode::OK, Json(updated)))
}

// POST /api/settings/reset
pub async fn reset_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.settings.reset())))
}
