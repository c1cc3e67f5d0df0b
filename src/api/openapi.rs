//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, borrows, document, health, stats, toys, uploads, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toybox API",
        version = "1.0.0",
        description = "Toy sharing marketplace REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        auth::logout,
        auth::me,
        // Toys
        toys::list_toys,
        toys::browse_toys,
        toys::my_toys,
        toys::list_categories,
        toys::get_toy,
        toys::create_toy,
        toys::update_toy,
        toys::delete_toy,
        // Borrows
        borrows::request_borrow,
        borrows::list_borrows,
        borrows::my_borrows,
        borrows::incoming_requests,
        borrows::approve_borrow,
        borrows::reject_borrow,
        borrows::return_borrow,
        // Users
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Stats
        stats::get_stats,
        // Uploads
        uploads::upload_file,
        // Admin
        document::get_document,
        document::update_document,
    ),
    components(
        schemas(
            // Users
            crate::models::user::LoginRequest,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateUser,
            crate::models::user::UserProfile,
            crate::models::user::Role,
            // Toys
            crate::models::toy::Toy,
            crate::models::toy::ToyCondition,
            crate::models::toy::CreateToy,
            crate::models::toy::UpdateToy,
            crate::models::toy::ToyQuery,
            // Borrows
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::BorrowStatus,
            crate::models::borrow::CreateBorrow,
            // Stats
            crate::models::stats::DashboardStats,
            // Uploads
            uploads::UploadResponse,
            // Admin
            crate::storage::Section,
            document::DocumentUpdate,
            document::DocumentUpdateResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Session endpoints"),
        (name = "toys", description = "Toy catalogue"),
        (name = "borrows", description = "Borrow requests and returns"),
        (name = "users", description = "User management"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "uploads", description = "Image uploads"),
        (name = "admin", description = "Raw document administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_borrow_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/borrows", "/borrows/{id}/approve", "/toys/browse", "/admin/document"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
