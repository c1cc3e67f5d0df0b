//! Whole-document administration endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    policy,
    storage::{Document, Section},
};

use super::CurrentActor;

/// Replace one section (`section` + `data`) or the whole document (`db`)
#[derive(Debug, Deserialize, ToSchema)]
pub struct DocumentUpdate {
    pub section: Option<Section>,
    #[schema(value_type = Object)]
    pub data: Option<Value>,
    #[schema(value_type = Object)]
    pub db: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentUpdateResponse {
    pub ok: bool,
    /// Section that was replaced; absent for a whole-document replace
    pub section: Option<Section>,
    /// The stored section, or the whole document
    #[schema(value_type = Object)]
    pub data: Value,
}

/// Read the whole stored document
#[utoipa::path(
    get,
    path = "/admin/document",
    tag = "admin",
    responses(
        (status = 200, description = "Whole document"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn get_document(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
) -> AppResult<Json<Value>> {
    policy::require_list_all_users(&actor)?;

    let document = state.services.repository.document().await;
    Ok(Json(serde_json::to_value(document)?))
}

/// Replace a section or the whole document
#[utoipa::path(
    post,
    path = "/admin/document",
    tag = "admin",
    request_body = DocumentUpdate,
    responses(
        (status = 200, description = "Document updated", body = DocumentUpdateResponse),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn update_document(
    State(state): State<crate::AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<DocumentUpdate>,
) -> AppResult<Json<DocumentUpdateResponse>> {
    policy::require_list_all_users(&actor)?;
    let repository = &state.services.repository;

    match request {
        DocumentUpdate {
            section: Some(section),
            data: Some(data),
            ..
        } => {
            Document::default()
                .set_section(section, data.clone())
                .map_err(invalid_payload)?;
            repository.replace_section(section, data).await?;
            let data = repository.document().await.section_value(section)?;
            Ok(Json(DocumentUpdateResponse {
                ok: true,
                section: Some(section),
                data,
            }))
        }
        DocumentUpdate { db: Some(db), .. } => {
            let document = Document::from_value(db).map_err(invalid_payload)?;
            repository.replace_document(document.clone()).await?;
            Ok(Json(DocumentUpdateResponse {
                ok: true,
                section: None,
                data: serde_json::to_value(document)?,
            }))
        }
        _ => Err(AppError::BadRequest("Invalid payload".to_string())),
    }
}

/// Shape errors in the submitted JSON are the caller's fault
fn invalid_payload(e: AppError) -> AppError {
    match e {
        AppError::Storage(msg) => AppError::BadRequest(msg),
        other => other,
    }
}
