// src/handlers/attendance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{db_utils::hhmm, error::AppError},
    config::AppState,
    models::attendance::{AttendanceDraft, ClockPayload},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
}

// Relógio local, truncado em minutos ("HH:MM")
fn resolve_clock(payload: &ClockPayload) -> (NaiveDate, chrono::NaiveTime) {
    let now = Local::now().naive_local();
    let date = payload.date.unwrap_or(now.date());
    let time = payload.time.unwrap_or_else(|| hhmm::truncate(now.time()));
    (date, time)
}

// GET /api/attendance
pub async fn list_attendance(
    State(app_state): State<AppState>,
    Query(filter): Query<AttendanceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let service = &app_state.attendance_service;
    let rows = match (filter.employee_id, filter.date) {
        (Some(employee_id), date) => service
            .list_by_employee(&employee_id)
            .into_iter()
            .filter(|a| date.is_none_or(|d| a.date == d))
            .collect(),
        (None, Some(date)) => service.list_by_date(date),
        (None, None) => service.list(),
    };
    Ok((StatusCode::OK, Json(rows)))
}

// POST /api/attendance/check-in
pub async fn check_in(
    State(app_state): State<AppState>,
    Json(payload): Json<ClockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let (date, time) = resolve_clock(&payload);
    let row = app_state
        .attendance_service
        .check_in(&payload.employee_id, date, time)?;
    Ok((StatusCode::CREATED, Json(row)))
}

// POST /api/attendance/check-out
pub async fn check_out(
    State(app_state): State<AppState>,
    Json(payload): Json<ClockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let (date, time) = resolve_clock(&payload);
    let row = app_state
        .attendance_service
        .check_out(&payload.employee_id, date, time)?;
    Ok((StatusCode::OK, Json(row)))
}

// POST /api/attendance
pub async fn create_attendance(
    State(app_state): State<AppState>,
    Json(payload): Json<AttendanceDraft>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state.attendance_service.create(payload)?;
    Ok((StatusCode::CREATED, Json(row)))
}

// PUT /api/attendance/{id}
pub async fn update_attendance(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AttendanceDraft>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state.attendance_service.update(&id, payload)?;
    Ok((StatusCode::OK, Json(row)))
}

// DELETE /api/attendance/{id}
pub async fn delete_attendance(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.attendance_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
