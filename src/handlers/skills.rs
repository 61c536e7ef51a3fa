// src/handlers/skills.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    models::skills::{
        CertificationDraft, SkillDraft, SkillGapDraft, TrainingDraft, TrainingStatusPayload,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeScope {
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapFilter {
    pub employee_id: Option<String>,
    #[serde(default)]
    pub open_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<u32>,
    pub from: Option<NaiveDate>,
}

// --- Competências ---

// GET /api/skills
pub async fn list_skills(
    State(app_state): State<AppState>,
    Query(scope): Query<EmployeeScope>,
) -> Result<impl IntoResponse, AppError> {
    let skills = app_state.skills_service.list_skills(scope.employee_id.as_deref());
    Ok((StatusCode::OK, Json(skills)))
}

// POST /api/skills
pub async fn create_skill(
    State(app_state): State<AppState>,
    Json(payload): Json<SkillDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::CREATED, Json(app_state.skills_service.create_skill(payload)?)))
}

// PUT /api/skills/{id}
pub async fn update_skill(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SkillDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.skills_service.update_skill(&id, payload)?)))
}

// DELETE /api/skills/{id}
pub async fn delete_skill(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.skills_service.delete_skill(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Treinamentos ---

// GET /api/trainings
pub async fn list_trainings(
    State(app_state): State<AppState>,
    Query(scope): Query<EmployeeScope>,
) -> Result<impl IntoResponse, AppError> {
    let trainings = app_state
        .skills_service
        .list_trainings(scope.employee_id.as_deref());
    Ok((StatusCode::OK, Json(trainings)))
}

// POST /api/trainings
pub async fn create_training(
    State(app_state): State<AppState>,
    Json(payload): Json<TrainingDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::CREATED, Json(app_state.skills_service.create_training(payload)?)))
}

// PUT /api/trainings/{id}
pub async fn update_training(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TrainingDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.skills_service.update_training(&id, payload)?)))
}

// PATCH /api/trainings/{id}/status
pub async fn set_training_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TrainingStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let training = app_state
        .skills_service
        .set_training_status(&id, payload.status)?;
    Ok((StatusCode::OK, Json(training)))
}

// DELETE /api/trainings/{id}
pub async fn delete_training(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.skills_service.delete_training(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Certificações ---

// GET /api/certifications
pub async fn list_certifications(
    State(app_state): State<AppState>,
    Query(scope): Query<EmployeeScope>,
) -> Result<impl IntoResponse, AppError> {
    let certifications = app_state
        .skills_service
        .list_certifications(scope.employee_id.as_deref());
    Ok((StatusCode::OK, Json(certifications)))
}

// GET /api/certifications/expiring?days=30
pub async fn expiring_certifications(
    State(app_state): State<AppState>,
    Query(query): Query<ExpiringQuery>,
) -> Result<impl IntoResponse, AppError> {
    let from = query.from.unwrap_or_else(|| Local::now().date_naive());
    let certifications = app_state
        .skills_service
        .expiring_certifications(from, query.days.unwrap_or(30));
    Ok((StatusCode::OK, Json(certifications)))
}

// POST /api/certifications
pub async fn create_certification(
    State(app_state): State<AppState>,
    Json(payload): Json<CertificationDraft>,
) -> Result<impl IntoResponse, AppError> {
    let certification = app_state.skills_service.create_certification(payload)?;
    Ok((StatusCode::CREATED, Json(certification)))
}

// PUT /api/certifications/{id}
pub async fn update_certification(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CertificationDraft>,
) -> Result<impl IntoResponse, AppError> {
    let certification = app_state.skills_service.update_certification(&id, payload)?;
    Ok((StatusCode::OK, Json(certification)))
}

// DELETE /api/certifications/{id}
pub async fn delete_certification(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.skills_service.delete_certification(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Lacunas ---

// GET /api/skill-gaps
pub async fn list_gaps(
    State(app_state): State<AppState>,
    Query(filter): Query<GapFilter>,
) -> Result<impl IntoResponse, AppError> {
    let gaps = app_state
        .skills_service
        .list_gaps(filter.employee_id.as_deref(), filter.open_only);
    Ok((StatusCode::OK, Json(gaps)))
}

// POST /api/skill-gaps
pub async fn create_gap(
    State(app_state): State<AppState>,
    Json(payload): Json<SkillGapDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::CREATED, Json(app_state.skills_service.create_gap(payload)?)))
}

// PUT /api/skill-gaps/{id}
pub async fn update_gap(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SkillGapDraft>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.skills_service.update_gap(&id, payload)?)))
}

// DELETE /api/skill-gaps/{id}
pub async fn delete_gap(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.skills_service.delete_gap(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
