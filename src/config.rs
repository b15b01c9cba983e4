//! Immutable service configuration, resolved once at startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::download::MediaPolicy;
use crate::download::constants::FETCH_TIMEOUT_SECS;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "downloads";

/// Largest accepted request body for `POST /api/download` (64 KiB).
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Settings shared by the HTTP surface and the download pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Flat directory artifacts are written to.
    pub storage_dir: PathBuf,
    /// Whole-request budget for each outbound fetch.
    pub fetch_timeout: Duration,
    /// Which content types may be stored.
    pub media_policy: MediaPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            media_policy: MediaPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Creates the storage directory (and parents) if it does not exist yet.
///
/// # Errors
///
/// Returns the underlying IO error if the directory cannot be created, or if
/// the path exists but is not a directory.
pub async fn ensure_storage_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let meta = tokio::fs::metadata(dir).await?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", dir.display()),
        ))
    }
}
