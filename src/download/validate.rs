//! Locator validation, run before any network action.

use url::Url;

use super::error::DownloadError;

/// Schemes the fetcher is allowed to dereference.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Validates a caller-supplied locator.
///
/// A locator is rejected when it is absent or blank ([`DownloadError::MissingUrl`]),
/// when it does not parse as an absolute URL, when it has no host, or when its
/// scheme is anything other than `http`/`https` ([`DownloadError::InvalidUrl`]).
///
/// # Errors
///
/// Returns [`DownloadError::MissingUrl`] or [`DownloadError::InvalidUrl`].
pub fn validate_locator(locator: Option<&str>) -> Result<Url, DownloadError> {
    let raw = locator.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(DownloadError::MissingUrl);
    }

    let parsed = Url::parse(raw).map_err(|e| DownloadError::invalid_url(raw, e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(DownloadError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(DownloadError::invalid_url(raw, "URL has no host"));
    }

    Ok(parsed)
}
