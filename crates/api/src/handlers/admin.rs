//! Handlers for user administration and the staff directory.
//!
//! Account approval is the admin action that moves a verified account into
//! the `approved` state and unlocks login.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use edualert_core::email::SYSTEM_USER_EMAIL;
use edualert_core::error::CoreError;
use edualert_core::roles;
use edualert_core::types::DbId;
use edualert_db::models::user::{UpdateUser, UserResponse};
use edualert_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireSenior};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin/users -- full user list for senior staff, including
/// unverified and unapproved accounts awaiting action.
pub async fn list_users(
    RequireSenior(_user): RequireSenior,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .filter(|u| u.email != SYSTEM_USER_EMAIL)
        .map(UserResponse::from)
        .collect();

    Ok(Json(DataResponse { data: users }))
}

/// GET /users -- approved-staff directory, for the assignment picker.
pub async fn directory(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .filter(|u| u.is_approved && u.email != SYSTEM_USER_EMAIL)
        .map(UserResponse::from)
        .collect();

    Ok(Json(DataResponse { data: users }))
}

/// POST /admin/users/{id}/approve -- approve a verified account.
pub async fn approve_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::approve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, approved_by = admin.user_id, "User approved");

    Ok(Json(DataResponse { data: user.into() }))
}

/// PATCH /admin/users/{id} -- update name, role, or approval flag.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    if let Some(ref role) = input.role {
        if !roles::is_valid_role(role) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid role '{}'. Must be one of: {:?}",
                role,
                roles::VALID_ROLES
            ))));
        }
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");

    Ok(Json(DataResponse { data: user.into() }))
}

/// DELETE /admin/users/{id} -- soft-delete an account.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }

    let deleted = UserRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, deleted_by = admin.user_id, "User soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}
