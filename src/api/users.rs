//! User management endpoints (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{UpdateUser, UserProfile},
    policy,
};

use super::CurrentActor;

/// List users without their passwords
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserProfile>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<UserProfile>>> {
    policy::require_list_all_users(&actor)?;

    let users = state.services.users.list().await;
    Ok(Json(users.iter().map(UserProfile::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserProfile),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserProfile>> {
    policy::require_list_all_users(&actor)?;

    let user = state.services.users.get(id).await?;
    Ok(Json(UserProfile::from(user)))
}

/// Update a user, role included
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserProfile),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<UserProfile>> {
    policy::require_list_all_users(&actor)?;

    let user = state.services.users.update(id, &data).await?;
    Ok(Json(UserProfile::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    policy::require_list_all_users(&actor)?;

    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
