//! HTTP client wrapper for fetching remote media.
//!
//! This module provides the `HttpClient` struct which issues the outbound GET
//! with a whole-request timeout, a bounded redirect policy and the service's
//! User-Agent, and hands back the response as a live byte stream.

use std::time::Duration;

use futures_util::Stream;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::classify::classify_transport_error;
use super::constants::{FETCH_TIMEOUT_SECS, MAX_REDIRECTS};
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for fetching files with streaming support.
///
/// This client is designed to be created once and shared by all requests,
/// taking advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// A successful (2xx) response whose body has not been read yet.
#[derive(Debug)]
pub struct FetchedResponse {
    response: reqwest::Response,
    content_type: Option<String>,
    content_length: Option<u64>,
}

impl FetchedResponse {
    /// The declared `Content-Type`, if present. Non-UTF-8 bytes are replaced.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The declared `Content-Length`. Advisory only.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// URL the body is actually served from, after redirects.
    #[must_use]
    pub fn final_url(&self) -> &Url {
        self.response.url()
    }

    /// Consumes the response into its body stream.
    pub fn into_byte_stream(
        self,
    ) -> impl Stream<Item = Result<impl AsRef<[u8]>, reqwest::Error>> + Send {
        self.response.bytes_stream()
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 30 second fetch budget.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with an explicit whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialised.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = base_client_builder(timeout).build()?;
        Ok(Self { client })
    }

    /// Issues a GET for `url` and returns the response once headers arrive.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Unresolvable`] if the host does not resolve
    /// - [`DownloadError::ConnectionRefused`] if the connection is refused
    /// - [`DownloadError::Timeout`] if the budget runs out before headers arrive
    /// - [`DownloadError::HttpStatus`] for any non-2xx final status
    /// - [`DownloadError::Network`] for anything else (TLS, redirect loop, ...)
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<FetchedResponse, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_transport_error(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string())
            .filter(|v| !v.is_empty());
        let content_length = response.content_length();

        debug!(
            status = status.as_u16(),
            final_url = %response.url(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            content_length = ?content_length,
            "response headers received"
        );

        Ok(FetchedResponse {
            response,
            content_type,
            content_length,
        })
    }
}

fn base_client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .user_agent(user_agent::default_fetch_user_agent())
}
