//! HTTP surface: `POST /api/download` and its companions.
//!
//! Every failure, including malformed bodies and unknown routes, is answered
//! with `{ "success": false, "error": <label>, "message": <text> }`.

pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::MAX_REQUEST_BODY_BYTES;
use crate::download::DownloadService;
use response::DOWNLOADS_ROUTE;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<DownloadService>,
}

/// Builds the application router around a download service.
///
/// Stored artifacts are served read-only from the service's storage
/// directory under `/downloads`.
pub fn router(service: DownloadService) -> Router {
    let storage_dir = service.storage_dir().to_path_buf();
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/", get(handlers::status))
        .route(
            "/api/download",
            get(handlers::usage).post(handlers::download),
        )
        .nest_service(DOWNLOADS_ROUTE, ServeDir::new(storage_dir))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
