//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::{user::LoginRequest, RegisterUser, UserProfile},
};

use super::CurrentActor;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = UserProfile),
        (status = 401, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .services
        .sessions
        .login(&request.email, &request.password)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    Ok(Json(UserProfile::from(user)))
}

/// Create a customer account and sign it in
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let user = state.services.sessions.register(request).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(user))))
}

/// Sign out the current actor
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out")
    )
)]
pub async fn logout(State(state): State<crate::AppState>) -> AppResult<StatusCode> {
    state.services.sessions.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the signed-in actor
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current actor", body = UserProfile),
        (status = 401, description = "Not signed in", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(CurrentActor(actor): CurrentActor) -> Json<UserProfile> {
    Json(UserProfile::from(actor))
}
