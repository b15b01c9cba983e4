//! Error types for the download module.
//!
//! Every failure of the download pipeline is a [`DownloadError`]. Each variant
//! carries the context needed for logs (url, path, status) and maps to exactly
//! one outward [`ErrorKind`], which owns the label and HTTP status the API
//! reports back to the caller.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Outward-facing classification of a failed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request carried no locator.
    MissingInput,
    /// The locator is not a well-formed `http`/`https` URL.
    InvalidInput,
    /// The media gate rejected the declared content type.
    NotMediaType,
    /// The locator's host could not be resolved.
    Unresolvable,
    /// The remote host refused the connection.
    ConnectionRefused,
    /// The fetch exceeded its time budget.
    Timeout,
    /// The remote server answered with a non-2xx status.
    UpstreamError,
    /// The artifact could not be written to storage.
    StorageError,
    /// Anything not covered above.
    Unknown,
}

impl ErrorKind {
    /// Stable label reported in the `error` field of failure responses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingInput => "MissingInput",
            Self::InvalidInput => "InvalidInput",
            Self::NotMediaType => "NotMediaType",
            Self::Unresolvable => "Unresolvable",
            Self::ConnectionRefused => "ConnectionRefused",
            Self::Timeout => "Timeout",
            Self::UpstreamError => "UpstreamError",
            Self::StorageError => "StorageError",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur while downloading and persisting a file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// No locator was supplied.
    #[error("missing URL in request")]
    MissingUrl,

    /// The provided URL is malformed or uses an unsupported scheme.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// The response declared a content type outside the media allow-list.
    #[error("not a media file at {url}: content type {content_type}")]
    NotMediaType {
        /// The URL whose response was rejected.
        url: String,
        /// The declared content type.
        content_type: String,
    },

    /// DNS resolution of the URL's host failed.
    #[error("could not resolve host for {url}: {source}")]
    Unresolvable {
        /// The URL whose host did not resolve.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The remote host actively refused the connection.
    #[error("connection refused downloading {url}: {source}")]
    ConnectionRefused {
        /// The URL that could not be connected to.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (any non-2xx status after redirects).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while storing the artifact.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Any other transport failure (interrupted body, redirect loop, TLS, ...).
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a media gate rejection.
    pub fn not_media_type(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::NotMediaType {
            url: url.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the outward classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingUrl => ErrorKind::MissingInput,
            Self::InvalidUrl { .. } => ErrorKind::InvalidInput,
            Self::NotMediaType { .. } => ErrorKind::NotMediaType,
            Self::Unresolvable { .. } => ErrorKind::Unresolvable,
            Self::ConnectionRefused { .. } => ErrorKind::ConnectionRefused,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::HttpStatus { .. } => ErrorKind::UpstreamError,
            Self::Io { .. } => ErrorKind::StorageError,
            Self::Network { .. } => ErrorKind::Unknown,
        }
    }

    /// HTTP status the API answers with for this error.
    ///
    /// Upstream 4xx/5xx statuses are mirrored; any other upstream status
    /// (e.g. an unfollowed 3xx) is reported as 400.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::HttpStatus { status, .. } if (400..=599).contains(status) => *status,
            _ => match self.kind() {
                ErrorKind::MissingInput
                | ErrorKind::InvalidInput
                | ErrorKind::NotMediaType
                | ErrorKind::UpstreamError => 400,
                ErrorKind::Unresolvable => 404,
                ErrorKind::ConnectionRefused => 503,
                ErrorKind::Timeout => 408,
                ErrorKind::StorageError | ErrorKind::Unknown => 500,
            },
        }
    }

    /// Human-readable message for API callers.
    ///
    /// Unlike `Display`, this never includes local paths or source error chains.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingUrl => "URL is required in request body".to_string(),
            Self::InvalidUrl { reason, .. } => format!("Please provide a valid URL ({reason})"),
            Self::NotMediaType { content_type, .. } => format!(
                "The provided URL does not point to a valid media file (Content-Type: {content_type})"
            ),
            Self::Unresolvable { .. } => "The provided URL could not be resolved".to_string(),
            Self::ConnectionRefused { .. } => {
                "Unable to connect to the provided URL".to_string()
            }
            Self::Timeout { .. } => "Download request timed out".to_string(),
            Self::HttpStatus { status, .. } => format!("Server responded with status {status}"),
            Self::Io { .. } => "Failed to save the downloaded file".to_string(),
            Self::Network { .. } => "An unexpected error occurred during download".to_string(),
        }
    }
}
