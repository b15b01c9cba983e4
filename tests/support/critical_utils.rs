//! Shared utilities for critical tests (misbehaving upstreams, storage inspection).
//!
//! wiremock always sends well-formed responses, so the failure modes that need
//! a lying or stalling server are driven by a raw TCP listener instead.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::socket_guard::should_skip_socket_bound_test;

/// What a raw upstream does after reading one request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status line and headers, without the terminating blank line.
    pub head: String,
    /// Bytes written after the head.
    pub body: Vec<u8>,
    /// How long to keep the connection open after writing the body.
    pub hold_open: Duration,
}

impl RawResponse {
    /// A 200 response that declares `declared_len` bytes but sends `body`.
    pub fn ok(content_type: &str, declared_len: usize, body: &[u8]) -> Self {
        Self {
            head: format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {declared_len}\r\nConnection: close"
            ),
            body: body.to_vec(),
            hold_open: Duration::ZERO,
        }
    }

    pub fn hold_open(mut self, duration: Duration) -> Self {
        self.hold_open = duration;
        self
    }
}

/// Serves `response` to every connection until the handle is aborted.
///
/// Returns `None` when localhost sockets are unavailable.
pub async fn spawn_raw_server(response: RawResponse) -> Option<(SocketAddr, JoinHandle<()>)> {
    if should_skip_socket_bound_test() {
        return None;
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.ok()?;
    let addr = listener.local_addr().ok()?;

    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let response = response.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = format!("{}\r\n\r\n", response.head);
                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }
                let _ = socket.write_all(&response.body).await;
                let _ = socket.flush().await;
                tokio::time::sleep(response.hold_open).await;
            });
        }
    });

    Some((addr, handle))
}

/// Lists every entry in `dir`.
pub fn stored_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("read storage dir")
        .map(|entry| entry.expect("dir entry").path())
        .collect()
}

/// Polls `dir` until it holds at least one entry or `timeout` elapses.
pub async fn wait_for_any_file(dir: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if !stored_files(dir).is_empty() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
