// Static JSON API server - serves the generated tree with axum + tower-http

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// Router serving `output_dir` verbatim under `prefix`.
/// Files that don't exist come back as 404.
pub fn build_router(output_dir: &Path, prefix: &str) -> Router {
    let files = ServeDir::new(output_dir);

    let router = Router::new().route("/health", get(health_check));
    let router = if prefix.trim_matches('/').is_empty() {
        router.fallback_service(files)
    } else {
        router.nest_service(prefix, files)
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
