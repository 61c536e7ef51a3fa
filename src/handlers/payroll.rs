// src/handlers/payroll.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::payroll::{GenerateBatchPayload, GenerateSalaryPayload},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryFilter {
    pub month: Option<String>,
    pub employee_id: Option<String>,
}

// GET /api/salaries
pub async fn list_salaries(
    State(app_state): State<AppState>,
    Query(filter): Query<SalaryFilter>,
) -> Result<impl IntoResponse, AppError> {
    let service = &app_state.payroll_service;
    let salaries = match (filter.month, filter.employee_id) {
        (Some(month), Some(employee_id)) => service
            .list_by_month(&month)?
            .into_iter()
            .filter(|s| s.employee_id == employee_id)
            .collect(),
        (Some(month), None) => service.list_by_month(&month)?,
        (None, Some(employee_id)) => service.list_by_employee(&employee_id),
        (None, None) => service.list(),
    };
    Ok((StatusCode::OK, Json(salaries)))
}

// GET /api/salaries/{id}
pub async fn get_salary(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.payroll_service.get(&id)?)))
}

// POST /api/salaries/generate
pub async fn generate_salary(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateSalaryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let salary = app_state
        .payroll_service
        .generate(&payload.employee_id, &payload.month)?;
    Ok((StatusCode::CREATED, Json(salary)))
}

// POST /api/salaries/generate-all
pub async fn generate_all(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateBatchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let generated = app_state.payroll_service.generate_for_active(&payload.month)?;
    Ok((StatusCode::CREATED, Json(generated)))
}

// DELETE /api/salaries/{id}
pub async fn delete_salary(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payroll_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/salaries/{id}/slip.pdf
pub async fn salary_slip_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    // Renderização do PDF é CPU-bound
    let documents = app_state.document_service.clone();
    let slip_id = id.clone();
    let pdf_bytes = tokio::task::spawn_blocking(move || documents.salary_slip_pdf(&slip_id))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de geração do PDF: {}", e))??;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"holerite_{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}
