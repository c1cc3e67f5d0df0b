//! Toy catalogue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreateToy, Toy, ToyQuery, UpdateToy},
};

use super::{CurrentActor, MaybeActor};

/// List every toy
#[utoipa::path(
    get,
    path = "/toys",
    tag = "toys",
    responses(
        (status = 200, description = "All toys", body = Vec<Toy>)
    )
)]
pub async fn list_toys(State(state): State<crate::AppState>) -> Json<Vec<Toy>> {
    Json(state.services.toys.list().await)
}

/// Toys available to borrow, excluding the actor's own
#[utoipa::path(
    get,
    path = "/toys/browse",
    tag = "toys",
    params(ToyQuery),
    responses(
        (status = 200, description = "Borrowable toys", body = Vec<Toy>)
    )
)]
pub async fn browse_toys(
    State(state): State<crate::AppState>,
    MaybeActor(actor): MaybeActor,
    Query(query): Query<ToyQuery>,
) -> Json<Vec<Toy>> {
    Json(state.services.toys.browse(actor.as_ref(), &query).await)
}

/// Toys owned by the actor
#[utoipa::path(
    get,
    path = "/toys/mine",
    tag = "toys",
    responses(
        (status = 200, description = "Own toys", body = Vec<Toy>),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn my_toys(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> Json<Vec<Toy>> {
    Json(state.services.toys.list_by_owner(actor.id).await)
}

/// Distinct toy categories
#[utoipa::path(
    get,
    path = "/toys/categories",
    tag = "toys",
    responses(
        (status = 200, description = "Sorted categories", body = Vec<String>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> Json<Vec<String>> {
    Json(state.services.toys.categories().await)
}

/// Get toy by ID
#[utoipa::path(
    get,
    path = "/toys/{id}",
    tag = "toys",
    params(
        ("id" = Uuid, Path, description = "Toy ID")
    ),
    responses(
        (status = 200, description = "Toy details", body = Toy),
        (status = 404, description = "Toy not found")
    )
)]
pub async fn get_toy(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Toy>> {
    let toy = state.services.toys.get(id).await?;
    Ok(Json(toy))
}

/// List a new toy owned by the actor
#[utoipa::path(
    post,
    path = "/toys",
    tag = "toys",
    request_body = CreateToy,
    responses(
        (status = 201, description = "Toy created", body = Toy),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn create_toy(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Json(fields): Json<CreateToy>,
) -> AppResult<(StatusCode, Json<Toy>)> {
    let toy = state.services.toys.create(&actor, fields).await?;
    Ok((StatusCode::CREATED, Json(toy)))
}

/// Update a toy (owner only)
#[utoipa::path(
    put,
    path = "/toys/{id}",
    tag = "toys",
    params(
        ("id" = Uuid, Path, description = "Toy ID")
    ),
    request_body = UpdateToy,
    responses(
        (status = 200, description = "Toy updated", body = Toy),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Toy not found")
    )
)]
pub async fn update_toy(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateToy>,
) -> AppResult<Json<Toy>> {
    let toy = state.services.toys.update(&actor, id, &data).await?;
    Ok(Json(toy))
}

/// Delete a toy (owner only, no open borrow)
#[utoipa::path(
    delete,
    path = "/toys/{id}",
    tag = "toys",
    params(
        ("id" = Uuid, Path, description = "Toy ID")
    ),
    responses(
        (status = 204, description = "Toy deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Toy not found"),
        (status = 409, description = "Toy has a pending or active borrow")
    )
)]
pub async fn delete_toy(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.toys.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
