//! HTTP handlers

use std::any::Any;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use super::AppState;
use super::response::{DOWNLOADS_ROUTE, DownloadSuccess, ErrorBody, error_response};
use crate::download::filename::CONTENT_TYPE_SUFFIXES;
use crate::download::{DownloadError, MediaPolicy};

/// Body of `POST /api/download`.
#[derive(Debug, Deserialize)]
pub struct DownloadRequestBody {
    pub url: Option<String>,
}

/// `GET /` - service status.
pub async fn status() -> Json<Value> {
    Json(json!({
        "message": "Media Downloader API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "API status",
            "GET /api/download": "API documentation",
            "POST /api/download": "Download media file",
            "GET /downloads/{filename}": "Fetch a stored file",
        }
    }))
}

/// `POST /api/download` - fetch a URL and store it.
pub async fn download(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequestBody>, JsonRejection>,
) -> Response {
    let locator = match payload {
        Ok(Json(body)) => body.url,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody::new("PayloadTooLarge", rejection.body_text()),
            );
        }
        Err(JsonRejection::JsonDataError(rejection)) => {
            return DownloadError::invalid_url("", rejection.body_text()).into_response();
        }
        Err(rejection) => {
            debug!(rejection = %rejection.body_text(), "request body is not usable JSON");
            None
        }
    };

    match state.service.download(locator.as_deref()).await {
        Ok(outcome) => (StatusCode::OK, Json(DownloadSuccess::from(outcome))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /api/download` - usage documentation.
pub async fn usage(State(state): State<AppState>) -> Json<Value> {
    let supported_formats: Vec<&str> = CONTENT_TYPE_SUFFIXES.iter().map(|(mime, _)| *mime).collect();
    Json(json!({
        "endpoint": "/api/download",
        "method": "POST",
        "description": "Download a file from a URL and store it under a generated name",
        "requestBody": { "url": "string (required) - http or https URL of the file" },
        "example": { "url": "https://httpbin.org/image/jpeg" },
        "mediaOnly": state.service.media_policy() == MediaPolicy::MediaOnly,
        "supportedFormats": supported_formats,
        "responses": {
            "200": {
                "success": true,
                "filePath": format!("{DOWNLOADS_ROUTE}/<artifactId>.jpg"),
                "filename": "<artifactId>.jpg",
                "artifactId": "<uuid>",
                "originalUrl": "https://httpbin.org/image/jpeg",
                "contentType": "image/jpeg",
                "size": 35588,
                "downloadTime": 0.42,
                "downloadedAt": "Sun, 06 Nov 1994 08:49:37 GMT"
            },
            "400": "MissingInput | InvalidInput | NotMediaType | UpstreamError",
            "404": "Unresolvable (or mirrored upstream 404)",
            "408": "Timeout",
            "500": "StorageError | Unknown",
            "503": "ConnectionRefused"
        }
    }))
}

/// Fallback for unknown routes.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        ErrorBody::new("RouteNotFound", format!("Cannot {method} {uri}")),
    )
}

/// Converts a handler panic into a generic 500.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    error!(panic = %detail, "request handler panicked");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("InternalError", "An unexpected error occurred"),
    )
}
