// src/handlers/performance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::skills::EmployeeScope,
    models::performance::{GoalDraft, ProgressPayload, ReviewDraft},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub employee_id: String,
    pub average_rating: Option<Decimal>,
    pub reviews: usize,
}

// --- Avaliações ---

// GET /api/reviews
pub async fn list_reviews(
    State(app_state): State<AppState>,
    Query(scope): Query<EmployeeScope>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = app_state
        .performance_service
        .list_reviews(scope.employee_id.as_deref());
    Ok((StatusCode::OK, Json(reviews)))
}

// GET /api/employees/{id}/rating
pub async fn employee_rating(
    State(app_state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.employee_service.ensure_exists(&employee_id)?;
    let service = &app_state.performance_service;
    let response = RatingResponse {
        average_rating: service.average_rating(&employee_id),
        reviews: service.list_reviews(Some(&employee_id)).len(),
        employee_id,
    };
    Ok((StatusCode::OK, Json(response)))
}

// POST /api/reviews
pub async fn create_review(
    State(app_state): State<AppState>,
    Json(payload): Json<ReviewDraft>,
) -> Result<impl IntoResponse, AppError> {
    let review = app_state.performance_service.create_review(payload)?;
    Ok((StatusCode::CREATED, Json(review)))
}

// PUT /api/reviews/{id}
pub async fn update_review(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewDraft>,
) -> Result<impl IntoResponse, AppError> {
    let review = app_state.performance_service.update_review(&id, payload)?;
    Ok((StatusCode::OK, Json(review)))
}

// DELETE /api/reviews/{id}
pub async fn delete_review(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.performance_service.delete_review(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Metas ---

// GET /api/goals
pub async fn list_goals(
    State(app_state): State<AppState>,
    Query(scope): Query<EmployeeScope>,
) -> Result<impl IntoResponse, AppError> {
    let goals = app_state
        .performance_service
        .list_goals(scope.employee_id.as_deref());
    Ok((StatusCode::OK, Json(goals)))
}

// POST /api/goals
pub async fn create_goal(
    State(app_state): State<AppState>,
    Json(payload): Json<GoalDraft>,
) -> Result<impl IntoResponse, AppError> {
    let goal = app_state.performance_service.create_goal(payload)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

// PUT /api/goals/{id}
pub async fn update_goal(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<GoalDraft>,
) -> Result<impl IntoResponse, AppError> {
    let goal = app_state.performance_service.update_goal(&id, payload)?;
    Ok((StatusCode::OK, Json(goal)))
}

// PATCH /api/goals/{id}/progress
pub async fn update_goal_progress(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProgressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let goal = app_state
        .performance_service
        .update_goal_progress(&id, payload.progress)?;
    Ok((StatusCode::OK, Json(goal)))
}

// DELETE /api/goals/{id}
pub async fn delete_goal(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.performance_service.delete_goal(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
