//! HTTP server.
//!
//! Provides endpoints for:
//! - Chat (`/api/chat`, `/api/chat/:provider`)
//! - Dashboard refresh (`/api/dashboard`) and reading history (`/api/readings`)
//! - Farms and fields (`/api/farms`, `/api/farms/:id/fields`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod handlers;
pub mod responses;
pub mod state;

pub use handlers::health_check;
pub use state::AppState;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // the mobile web client is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/chat/:provider", post(handlers::chat_with_provider))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/readings", get(handlers::list_readings))
        .route(
            "/api/farms",
            get(handlers::list_farms).post(handlers::create_farm),
        )
        .route("/api/farms/:id", get(handlers::get_farm))
        .route(
            "/api/farms/:id/fields",
            get(handlers::list_fields).post(handlers::create_field),
        )
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .with_state(state)
}
