//! Constants for the download module (timeouts, redirects, naming).

/// Whole-request budget for an outbound fetch (30 seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirect hops followed before the fetch fails.
pub const MAX_REDIRECTS: usize = 5;

/// Suffix used when neither the locator nor the content type names a format.
pub const FALLBACK_SUFFIX: &str = ".bin";

/// Content type assumed when a response does not declare one (RFC 9110 §8.3).
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Longest path extension (including the dot) accepted as a file suffix.
pub const MAX_SUFFIX_LEN: usize = 12;
