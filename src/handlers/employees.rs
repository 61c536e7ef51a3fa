// src/handlers/employees.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::employee::{EmployeeDraft, EmployeeStatus},
};

#[derive(Debug, Deserialize)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeStatusPayload {
    pub status: EmployeeStatus,
}

// GET /api/employees
pub async fn list_employees(
    State(app_state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state
        .employee_service
        .list_filtered(filter.status, filter.department.as_deref());
    Ok((StatusCode::OK, Json(employees)))
}

// GET /api/employees/{id}
pub async fn get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.get(&id)?;
    Ok((StatusCode::OK, Json(employee)))
}

// POST /api/employees
pub async fn create_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<EmployeeDraft>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.create(payload)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// PUT /api/employees/{id}
pub async fn update_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeDraft>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.update(&id, payload)?;
    Ok((StatusCode::OK, Json(employee)))
}

// PATCH /api/employees/{id}/status
pub async fn set_employee_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state.employee_service.set_status(&id, payload.status)?;
    Ok((StatusCode::OK, Json(employee)))
}

// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.employee_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
