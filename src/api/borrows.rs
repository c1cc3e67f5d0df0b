//! Borrow request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BorrowRecord, CreateBorrow},
    policy,
};

use super::CurrentActor;

/// Request to borrow a toy
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow request created", body = BorrowRecord),
        (status = 400, description = "Invalid dates"),
        (status = 404, description = "Toy not found"),
        (status = 409, description = "Toy not available"),
        (status = 422, description = "Owner cannot borrow own toy")
    )
)]
pub async fn request_borrow(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowRecord>)> {
    let record = state.services.borrows.request_borrow(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List every borrow record (staff)
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    responses(
        (status = 200, description = "All borrow records", body = Vec<BorrowRecord>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_borrows(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    policy::require_view_all_borrows(&actor)?;
    Ok(Json(state.services.borrows.list_all().await))
}

/// Borrow records where the actor is the borrower
#[utoipa::path(
    get,
    path = "/borrows/mine",
    tag = "borrows",
    responses(
        (status = 200, description = "Own borrows", body = Vec<BorrowRecord>)
    )
)]
pub async fn my_borrows(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> Json<Vec<BorrowRecord>> {
    Json(state.services.borrows.list_by_borrower(actor.id).await)
}

/// Borrow records for toys the actor owns
#[utoipa::path(
    get,
    path = "/borrows/requests",
    tag = "borrows",
    responses(
        (status = 200, description = "Requests for own toys", body = Vec<BorrowRecord>)
    )
)]
pub async fn incoming_requests(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> Json<Vec<BorrowRecord>> {
    Json(state.services.borrows.list_for_owned_toys(actor.id).await)
}

/// Approve a pending request
#[utoipa::path(
    post,
    path = "/borrows/{id}/approve",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Borrow is active", body = BorrowRecord),
        (status = 403, description = "Not staff or toy owner"),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Record is not pending")
    )
)]
pub async fn approve_borrow(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.get(id).await?;
    policy::require_decide_borrow(&actor, &record)?;

    let record = state.services.borrows.approve(id).await?;
    Ok(Json(record))
}

/// Reject a pending request
#[utoipa::path(
    post,
    path = "/borrows/{id}/reject",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = BorrowRecord),
        (status = 403, description = "Not staff or toy owner"),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Record is not pending")
    )
)]
pub async fn reject_borrow(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.get(id).await?;
    policy::require_decide_borrow(&actor, &record)?;

    let record = state.services.borrows.reject(id).await?;
    Ok(Json(record))
}

/// Mark an active borrow as returned
#[utoipa::path(
    post,
    path = "/borrows/{id}/return",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Toy returned", body = BorrowRecord),
        (status = 403, description = "Not a party to this borrow"),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Record is not active")
    )
)]
pub async fn return_borrow(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.get(id).await?;
    policy::require_mark_returned(&actor, &record)?;

    let record = state.services.borrows.mark_returned(id).await?;
    Ok(Json(record))
}
