//! Toybox Server - Toy Sharing Marketplace
//!
//! REST API server for listing, browsing and borrowing toys.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toybox_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    storage,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("toybox_server={},tower_http=debug", config.logging.level).into());

    // The guard flushes buffered file logs on drop, so it lives until main returns
    let (file_layer, _log_guard) = match &config.logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "toybox-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let json = config.logging.format.eq_ignore_ascii_case("json");

    tracing_subscriber::registry()
        .with(filter)
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with(file_layer)
        .init();

    tracing::info!("Starting Toybox Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store and load every collection
    let store = storage::open_store(&config.storage).await?;
    let repository = Repository::open(store).await?;

    if config.storage.seed_defaults && repository.seed_if_empty().await? {
        tracing::info!("Sample users and toys created");
    }

    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let services = Services::new(repository, config.uploads.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse()?, server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Leave room for multipart framing around the file itself
    let upload_limit = state.config.uploads.max_bytes + 64 * 1024;
    let uploads_dir = state.config.uploads.dir.clone();

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Session
        .route("/auth/login", post(api::auth::login))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        // Toys
        .route("/toys", get(api::toys::list_toys).post(api::toys::create_toy))
        .route("/toys/browse", get(api::toys::browse_toys))
        .route("/toys/mine", get(api::toys::my_toys))
        .route("/toys/categories", get(api::toys::list_categories))
        .route(
            "/toys/:id",
            get(api::toys::get_toy)
                .put(api::toys::update_toy)
                .delete(api::toys::delete_toy),
        )
        // Borrows
        .route(
            "/borrows",
            get(api::borrows::list_borrows).post(api::borrows::request_borrow),
        )
        .route("/borrows/mine", get(api::borrows::my_borrows))
        .route("/borrows/requests", get(api::borrows::incoming_requests))
        .route("/borrows/:id/approve", post(api::borrows::approve_borrow))
        .route("/borrows/:id/reject", post(api::borrows::reject_borrow))
        .route("/borrows/:id/return", post(api::borrows::return_borrow))
        // Users
        .route("/users", get(api::users::list_users))
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        // Uploads
        .route(
            "/uploads",
            post(api::uploads::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Raw document
        .route(
            "/admin/document",
            get(api::document::get_document).post(api::document::update_document),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
