//! Image upload endpoint

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

use super::CurrentActor;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    /// Public URL of the stored file
    pub url: String,
}

/// Upload an image (multipart field `file`)
#[utoipa::path(
    post,
    path = "/uploads",
    tag = "uploads",
    request_body(content = String, description = "Form with a `file` field", content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing, empty or oversized file")
    )
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    CurrentActor(_actor): CurrentActor,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        let url = state
            .services
            .uploads
            .store(file_name.as_deref(), &bytes)
            .await?;
        return Ok((StatusCode::CREATED, Json(UploadResponse { ok: true, url })));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
