// src/handlers/leaves.rs

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
    models::leave::{LeaveDraft, PermissionDraft, RequestStatus, ReviewPayload, StatusPayload},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub employee_id: Option<String>,
}

// =============================================================================
//  FÉRIAS / LICENÇAS
// =============================================================================

// GET /api/leaves
pub async fn list_leaves(
    State(app_state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Result<impl IntoResponse, AppError> {
    let service = &app_state.leave_service;
    let leaves: Vec<_> = match filter.employee_id {
        Some(employee_id) => service
            .list_leaves_by_employee(&employee_id)
            .into_iter()
            .filter(|l| filter.status.is_none_or(|s| l.status == s))
            .collect(),
        None => service.list_leaves(filter.status),
    };
    Ok((StatusCode::OK, Json(leaves)))
}

// GET /api/leaves/{id}
pub async fn get_leave(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.leave_service.get_leave(&id)?)))
}

// POST /api/leaves
pub async fn create_leave(
    State(app_state): State<AppState>,
    Json(payload): Json<LeaveDraft>,
) -> Result<impl IntoResponse, AppError> {
    let leave = app_state.leave_service.request_leave(payload)?;
    Ok((StatusCode::CREATED, Json(leave)))
}

// PUT /api/leaves/{id}
pub async fn update_leave(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<LeaveDraft>,
) -> Result<impl IntoResponse, AppError> {
    let leave = app_state.leave_service.update_leave(&id, payload)?;
    Ok((StatusCode::OK, Json(leave)))
}

// PATCH /api/leaves/{id}/status
pub async fn set_leave_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let leave = app_state.leave_service.set_leave_status(&id, payload.status)?;
    Ok((StatusCode::OK, Json(leave)))
}

// POST /api/leaves/{id}/review
pub async fn review_leave(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let leave = app_state.leave_service.review_leave(&id, payload)?;
    Ok((StatusCode::OK, Json(leave)))
}

// DELETE /api/leaves/{id}
pub async fn delete_leave(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.leave_service.delete_leave(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PERMISSÕES
// =============================================================================

// GET /api/permissions
pub async fn list_permissions(
    State(app_state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> Result<impl IntoResponse, AppError> {
    let permissions: Vec<_> = app_state
        .leave_service
        .list_permissions(filter.status)
        .into_iter()
        .filter(|p| filter.employee_id.as_deref().is_none_or(|id| p.employee_id == id))
        .collect();
    Ok((StatusCode::OK, Json(permissions)))
}

// GET /api/permissions/{id}
pub async fn get_permission(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.leave_service.get_permission(&id)?)))
}

// POST /api/permissions
pub async fn create_permission(
    State(app_state): State<AppState>,
    Json(payload): Json<PermissionDraft>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state.leave_service.request_permission(payload)?;
    Ok((StatusCode::CREATED, Json(permission)))
}

// PUT /api/permissions/{id}
pub async fn update_permission(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PermissionDraft>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state.leave_service.update_permission(&id, payload)?;
    Ok((StatusCode::OK, Json(permission)))
}

// PATCH /api/permissions/{id}/status
pub async fn set_permission_status(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state
        .leave_service
        .set_permission_status(&id, payload.status)?;
    Ok((StatusCode::OK, Json(permission)))
}

// POST /api/permissions/{id}/review
pub async fn review_permission(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let permission = app_state.leave_service.review_permission(&id, payload)?;
    Ok((StatusCode::OK, Json(permission)))
}

// DELETE /api/permissions/{id}
pub async fn delete_permission(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.leave_service.delete_permission(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
