//! Toybox toy sharing marketplace
//!
//! Members list toys they own, browse and borrow toys owned by others, and
//! staff moderate borrow requests. All state lives in one JSON document held
//! by a pluggable store and served over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;
pub mod storage;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
