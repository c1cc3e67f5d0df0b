//! API handlers for Toybox REST endpoints

pub mod auth;
pub mod borrows;
pub mod document;
pub mod health;
pub mod openapi;
pub mod stats;
pub mod toys;
pub mod uploads;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::User, AppState};

/// Extractor for the signed-in actor held by the session store
pub struct CurrentActor(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        state
            .services
            .sessions
            .current()
            .await
            .map(CurrentActor)
            .ok_or_else(|| AppError::Authentication("Not signed in".to_string()))
    }
}

/// Like [`CurrentActor`] but does not reject anonymous requests
pub struct MaybeActor(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeActor {
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeActor(state.services.sessions.current().await))
    }
}
