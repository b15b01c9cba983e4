//! The download-and-persist pipeline: validate, fetch, classify, persist.
//!
//! Each call to [`DownloadService::download`] runs the four stages in order and
//! produces exactly one stored artifact or one error. Nothing is shared between
//! calls except the storage directory, and every artifact gets a fresh random
//! name, so concurrent downloads never contend.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::constants::DEFAULT_CONTENT_TYPE;
use super::error::DownloadError;
use super::filename::{artifact_filename, is_media_content_type, new_artifact_id, resolve_suffix};
use super::persistence::persist_stream;
use super::validate::validate_locator;

/// Which response content types may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaPolicy {
    /// Only `image/*`, `video/*`, `audio/*` and `application/octet-stream`.
    #[default]
    MediaOnly,
    /// Any content type.
    AnyContentType,
}

/// Metadata about a successfully stored artifact.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Random identifier the stored file is named after.
    pub artifact_id: String,
    /// Stored file name (`<artifact_id><suffix>`).
    pub filename: String,
    /// Full path of the stored file.
    pub path: PathBuf,
    /// The locator as supplied by the caller.
    pub original_url: String,
    /// Declared content type, or `application/octet-stream` when none was sent.
    pub content_type: String,
    /// Bytes actually written.
    pub bytes: u64,
    /// Wall-clock time from validation to finalization.
    pub elapsed: Duration,
    /// When the file was finalized.
    pub completed_at: DateTime<Utc>,
}

/// Runs downloads into a single flat storage directory.
#[derive(Debug, Clone)]
pub struct DownloadService {
    client: HttpClient,
    storage_dir: PathBuf,
    media_policy: MediaPolicy,
}

impl DownloadService {
    /// Creates a service writing into `storage_dir`.
    ///
    /// The directory is expected to exist; a missing or read-only directory
    /// surfaces as [`DownloadError::Io`] on the first download.
    #[must_use]
    pub fn new(client: HttpClient, storage_dir: impl Into<PathBuf>, media_policy: MediaPolicy) -> Self {
        Self {
            client,
            storage_dir: storage_dir.into(),
            media_policy,
        }
    }

    /// The directory artifacts are written to.
    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// The configured media gate.
    #[must_use]
    pub fn media_policy(&self) -> MediaPolicy {
        self.media_policy
    }

    /// Downloads `locator` and stores it under a generated name.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] for the first failing stage. No file is left
    /// in storage when an error is returned.
    #[instrument(skip(self), fields(url = locator.unwrap_or("<missing>")))]
    pub async fn download(&self, locator: Option<&str>) -> Result<DownloadOutcome, DownloadError> {
        let started = Instant::now();
        let result = self.run(locator, started).await;
        match &result {
            Ok(outcome) => info!(
                path = %outcome.path.display(),
                bytes = outcome.bytes,
                elapsed_ms = outcome.elapsed.as_millis(),
                "download complete"
            ),
            Err(e) => warn!(kind = %e.kind(), error = %e, "download failed"),
        }
        result
    }

    async fn run(&self, locator: Option<&str>, started: Instant) -> Result<DownloadOutcome, DownloadError> {
        let url = validate_locator(locator)?;
        info!("starting download");

        let fetched = self.client.fetch(&url).await?;

        let content_type = fetched
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        if self.media_policy == MediaPolicy::MediaOnly && !is_media_content_type(&content_type) {
            return Err(DownloadError::not_media_type(url.as_str(), content_type));
        }

        let suffix = resolve_suffix(&url, fetched.content_type());
        let artifact_id = new_artifact_id();
        let filename = artifact_filename(&artifact_id, &suffix);
        let path = self.storage_dir.join(&filename);
        let declared_len = fetched.content_length();
        debug!(
            %content_type,
            declared_len = ?declared_len,
            path = %path.display(),
            "resolved artifact name"
        );

        let bytes = persist_stream(fetched.into_byte_stream(), url.as_str(), &path, declared_len).await?;

        Ok(DownloadOutcome {
            artifact_id,
            filename,
            path,
            original_url: locator.map(str::trim).unwrap_or_default().to_string(),
            content_type,
            bytes,
            elapsed: started.elapsed(),
            completed_at: Utc::now(),
        })
    }
}
