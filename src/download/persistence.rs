//! Streams a response body into a freshly created artifact file.
//!
//! The file is owned by a [`PartialFile`] guard until every byte has been
//! written and flushed. If the copy fails, or the future driving it is dropped
//! because the caller went away, the guard deletes the file so no partial
//! artifact is left in storage.

use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use super::classify::classify_transport_error;
use super::error::DownloadError;
use super::progress::ProgressTracker;

/// Removes the file at `path` when dropped, unless committed.
#[derive(Debug)]
pub(crate) struct PartialFile {
    path: PathBuf,
    committed: bool,
}

impl PartialFile {
    /// Creates a new file at `path`, failing if one already exists.
    pub(crate) async fn create_new(path: &Path) -> Result<(Self, File), DownloadError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| DownloadError::io(path, e))?;
        let guard = Self {
            path: path.to_path_buf(),
            committed: false,
        };
        Ok((guard, file))
    }

    /// Keeps the file and returns its path.
    pub(crate) fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Blocking removal: the file must be gone by the time the owning future is dropped.
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed partial file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove partial file"),
        }
    }
}

/// Copies `stream` into a new file at `path`, returning the bytes written.
///
/// `declared_len` only drives progress logging; the returned count is what was
/// actually written. A body error reported by the transport (including a body
/// shorter than its declared length) fails the copy and removes the file.
pub(crate) async fn persist_stream<S, B>(
    stream: S,
    url: &str,
    path: &Path,
    declared_len: Option<u64>,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);
    let (guard, file) = PartialFile::create_new(path).await?;
    let mut writer = BufWriter::new(file);
    let mut progress = ProgressTracker::new(declared_len);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| classify_transport_error(url, e))?;
        let bytes = chunk.as_ref();

        writer
            .write_all(bytes)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        if let Some(percent) = progress.record(bytes.len()) {
            debug!(
                percent,
                bytes = progress.bytes_written(),
                "download progress"
            );
        }
    }

    // Ensure all data is flushed to disk
    writer.flush().await.map_err(|e| DownloadError::io(path, e))?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    if let Some(declared) = progress.declared_len()
        && declared != progress.bytes_written()
    {
        debug!(
            declared,
            written = progress.bytes_written(),
            "body length differs from declared Content-Length"
        );
    }

    guard.commit();
    Ok(progress.bytes_written())
}
