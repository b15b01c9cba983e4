//! Client identity string sent with every outbound fetch.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/media-downloader";

/// Default User-Agent for fetch requests (identifies the service and its version).
#[must_use]
pub(crate) fn default_fetch_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("media-downloader/{version} (media-fetch-service; +{PROJECT_UA_URL})")
}
