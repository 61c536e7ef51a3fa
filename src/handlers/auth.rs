// src/handlers/auth.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, CreateUserPayload, LoginUserPayload, User, UserProfile, UserRole},
};

fn require_admin(user: &User) -> Result<(), AppError> {
    if user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/auth/me
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserProfile> {
    Json(user.into())
}

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    let users: Vec<UserProfile> = app_state
        .auth_service
        .list_users()
        .into_iter()
        .map(UserProfile::from)
        .collect();
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    let created = app_state.auth_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(created))))
}

// DELETE /api/users/{id}
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&user)?;
    if user.id == id {
        return Err(AppError::field_error(
            "id",
            "self_delete",
            "Não é possível remover o próprio usuário.",
        ));
    }
    app_state.auth_service.delete_user(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
