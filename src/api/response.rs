//! JSON response bodies for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::download::{DownloadError, DownloadOutcome};

/// URL prefix under which stored artifacts are served.
pub const DOWNLOADS_ROUTE: &str = "/downloads";

/// IMF-fixdate, as used in HTTP `Date` headers.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Body of a successful `POST /api/download`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadSuccess {
    pub success: bool,
    pub file_path: String,
    pub filename: String,
    pub artifact_id: String,
    pub original_url: String,
    pub content_type: String,
    pub size: u64,
    /// Seconds from validation to finalization.
    pub download_time: f64,
    /// HTTP-date at which the file was finalized.
    pub downloaded_at: String,
}

impl From<DownloadOutcome> for DownloadSuccess {
    fn from(outcome: DownloadOutcome) -> Self {
        Self {
            success: true,
            file_path: format!("{DOWNLOADS_ROUTE}/{}", outcome.filename),
            filename: outcome.filename,
            artifact_id: outcome.artifact_id,
            original_url: outcome.original_url,
            content_type: outcome.content_type,
            size: outcome.bytes,
            download_time: outcome.elapsed.as_secs_f64(),
            downloaded_at: outcome
                .completed_at
                .format(HTTP_DATE_FORMAT)
                .to_string(),
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Builds a JSON error response.
pub fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error_response(status, ErrorBody::new(self.kind().label(), self.user_message()))
    }
}
