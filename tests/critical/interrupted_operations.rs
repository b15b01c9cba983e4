//! Transfers cut short: truncated bodies, stalled bodies, and callers that go
//! away mid-download. No partial artifact may remain in storage.

use std::time::Duration;

use media_downloader_core::{DownloadService, ErrorKind, HttpClient, MediaPolicy};
use tempfile::TempDir;

use crate::support::critical_utils::{
    RawResponse, spawn_raw_server, stored_files, wait_for_any_file,
};
use crate::support::socket_guard::socket_skip_return;

#[tokio::test]
async fn p0_body_shorter_than_content_length_leaves_no_file() {
    let Some((addr, server)) =
        spawn_raw_server(RawResponse::ok("image/png", 100, b"0123456789")).await
    else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");
    let service = DownloadService::new(HttpClient::new(), temp_dir.path(), MediaPolicy::MediaOnly);

    let url = format!("http://{addr}/truncated.png");
    let err = service
        .download(Some(&url))
        .await
        .expect_err("truncated body must fail");

    assert_eq!(err.kind(), ErrorKind::Unknown, "got {err:?}");
    assert_eq!(err.status_code(), 500);
    assert!(
        stored_files(temp_dir.path()).is_empty(),
        "partial file must be removed"
    );
    server.abort();
}

#[tokio::test]
async fn p0_stalled_body_times_out_and_leaves_no_file() {
    let response = RawResponse::ok("video/mp4", 1000, b"partial").hold_open(Duration::from_secs(5));
    let Some((addr, server)) = spawn_raw_server(response).await else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");
    let client = HttpClient::with_timeout(Duration::from_millis(300)).expect("client");
    let service = DownloadService::new(client, temp_dir.path(), MediaPolicy::MediaOnly);

    let url = format!("http://{addr}/stalled.mp4");
    let err = service
        .download(Some(&url))
        .await
        .expect_err("stalled body must fail");

    assert_eq!(err.kind(), ErrorKind::Timeout, "got {err:?}");
    assert!(stored_files(temp_dir.path()).is_empty());
    server.abort();
}

#[tokio::test]
async fn p0_cancelled_download_removes_partial_file() {
    let response = RawResponse::ok("audio/mpeg", 1_000_000, &[0xFF; 64]).hold_open(Duration::from_secs(30));
    let Some((addr, server)) = spawn_raw_server(response).await else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");
    let service = DownloadService::new(HttpClient::new(), temp_dir.path(), MediaPolicy::MediaOnly);

    let url = format!("http://{addr}/endless.mp3");
    let task = tokio::spawn(async move { service.download(Some(&url)).await });

    assert!(
        wait_for_any_file(temp_dir.path(), Duration::from_secs(5)).await,
        "download never created its artifact file"
    );
    task.abort();
    let joined = task.await;
    assert!(joined.is_err_and(|e| e.is_cancelled()));

    assert!(
        stored_files(temp_dir.path()).is_empty(),
        "cancelled download must not leave a partial file"
    );
    server.abort();
}
