//! Maps transport-level `reqwest` failures onto the download error taxonomy.
//!
//! `reqwest` reports DNS failures and refused connections both as connect
//! errors, so the source chain is inspected to tell them apart: a refused
//! connection surfaces as an [`std::io::Error`] of kind `ConnectionRefused`,
//! while resolver failures are reported by hyper's connector as a "dns error".

use std::error::Error as StdError;

use super::error::DownloadError;

/// Fragments that identify a resolver failure anywhere in the source chain.
const DNS_ERROR_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
];

/// Converts a `reqwest` error raised while sending the request or reading the body.
pub(crate) fn classify_transport_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() || chain_has_io_kind(&error, std::io::ErrorKind::TimedOut) {
        return DownloadError::timeout(url);
    }
    if error.is_connect() {
        if chain_has_io_kind(&error, std::io::ErrorKind::ConnectionRefused) {
            return DownloadError::ConnectionRefused {
                url: url.to_string(),
                source: error,
            };
        }
        if is_dns_failure(&error) {
            return DownloadError::Unresolvable {
                url: url.to_string(),
                source: error,
            };
        }
    }
    if let Some(status) = error.status() {
        return DownloadError::http_status(url, status.as_u16());
    }
    DownloadError::Network {
        url: url.to_string(),
        source: error,
    }
}

fn chain_has_io_kind(error: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    source_chain(error)
        .filter_map(|e| e.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == kind)
}

fn is_dns_failure(error: &reqwest::Error) -> bool {
    source_chain(error).any(|e| {
        let message = e.to_string().to_ascii_lowercase();
        DNS_ERROR_MARKERS.iter().any(|marker| message.contains(marker))
    })
}

fn source_chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}
