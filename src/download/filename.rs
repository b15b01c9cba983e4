//! Suffix resolution, media-type gating, and artifact naming.
//!
//! Stored files are named `<artifact id><suffix>`. The artifact id is random and
//! never derived from the locator, so repeated downloads of one URL produce
//! distinct files. The suffix comes from, in order:
//!
//! 1. the extension of the locator's last path segment,
//! 2. the declared content type, looked up in [`CONTENT_TYPE_SUFFIXES`],
//! 3. [`FALLBACK_SUFFIX`].

use url::Url;
use uuid::Uuid;

use super::constants::{FALLBACK_SUFFIX, MAX_SUFFIX_LEN};

/// Normalized content type → stored file suffix.
pub const CONTENT_TYPE_SUFFIXES: &[(&str, &str)] = &[
    // Images
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/svg+xml", ".svg"),
    // Video
    ("video/mp4", ".mp4"),
    ("video/avi", ".avi"),
    ("video/x-msvideo", ".avi"),
    ("video/quicktime", ".mov"),
    ("video/x-ms-wmv", ".wmv"),
    ("video/x-flv", ".flv"),
    ("video/webm", ".webm"),
    // Audio
    ("audio/mpeg", ".mp3"),
    ("audio/mp3", ".mp3"),
    ("audio/wav", ".wav"),
    ("audio/x-wav", ".wav"),
    ("audio/flac", ".flac"),
    ("audio/aac", ".aac"),
    ("audio/ogg", ".ogg"),
];

/// Content-type prefixes accepted by the media gate.
const MEDIA_PREFIXES: &[&str] = &["image/", "video/", "audio/"];

/// Generic binary type, always accepted by the media gate.
const OCTET_STREAM: &str = "application/octet-stream";

/// Strips parameters and normalizes case: `Image/JPEG; q=1` → `image/jpeg`.
#[must_use]
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Looks up the suffix for a content type by exact (normalized) match.
#[must_use]
pub fn suffix_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = normalize_content_type(content_type);
    CONTENT_TYPE_SUFFIXES
        .iter()
        .find_map(|(candidate, suffix)| (*candidate == mime).then_some(*suffix))
}

/// Extracts a lowercase extension (with leading dot) from the URL's last path segment.
///
/// Only short, alphanumeric extensions are recognized; a trailing dot or a
/// dot-file such as `/.hidden` yields `None`.
#[must_use]
pub fn suffix_from_url(url: &Url) -> Option<String> {
    let last_segment = url.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    if dot_index == 0 {
        return None;
    }
    let ext = &last_segment[dot_index..];
    if ext.len() <= 1 || ext.len() > MAX_SUFFIX_LEN {
        return None;
    }
    if !ext[1..].chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Resolves the stored file suffix for a download.
#[must_use]
pub fn resolve_suffix(url: &Url, content_type: Option<&str>) -> String {
    suffix_from_url(url)
        .or_else(|| content_type.and_then(suffix_from_content_type).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_SUFFIX.to_string())
}

/// Returns true if the content type passes the media gate.
#[must_use]
pub fn is_media_content_type(content_type: &str) -> bool {
    let mime = normalize_content_type(content_type);
    mime == OCTET_STREAM || MEDIA_PREFIXES.iter().any(|prefix| mime.starts_with(prefix))
}

/// Generates a fresh artifact identifier (random 128-bit UUID, hyphenated).
#[must_use]
pub fn new_artifact_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the stored filename for an artifact.
#[must_use]
pub fn artifact_filename(artifact_id: &str, suffix: &str) -> String {
    format!("{artifact_id}{suffix}")
}
