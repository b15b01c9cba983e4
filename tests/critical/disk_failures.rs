//! Storage failures: the storage directory is missing or unusable.

use media_downloader_core::{DownloadError, DownloadService, ErrorKind, HttpClient, MediaPolicy};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::support::socket_guard::{socket_skip_return, start_mock_server_or_skip};

#[tokio::test]
async fn p0_missing_storage_dir_is_storage_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");
    let missing = temp_dir.path().join("does-not-exist");

    Mock::given(method("GET"))
        .and(path("/a.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"jpeg".to_vec(), "image/jpeg"))
        .mount(&mock_server)
        .await;

    let service = DownloadService::new(HttpClient::new(), &missing, MediaPolicy::MediaOnly);
    let url = format!("{}/a.jpg", mock_server.uri());
    let err = service
        .download(Some(&url))
        .await
        .expect_err("write into a missing directory must fail");

    assert!(matches!(err, DownloadError::Io { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::StorageError);
    assert_eq!(err.status_code(), 500);
    assert!(!missing.exists());
}

#[tokio::test]
async fn p0_storage_path_that_is_a_file_is_storage_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");
    let not_a_dir = temp_dir.path().join("plain-file");
    std::fs::write(&not_a_dir, b"occupied").expect("write");

    Mock::given(method("GET"))
        .and(path("/a.ogg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"OggS".to_vec(), "audio/ogg"))
        .mount(&mock_server)
        .await;

    let service = DownloadService::new(HttpClient::new(), &not_a_dir, MediaPolicy::MediaOnly);
    let url = format!("{}/a.ogg", mock_server.uri());
    let err = service
        .download(Some(&url))
        .await
        .expect_err("write beneath a regular file must fail");

    assert_eq!(err.kind(), ErrorKind::StorageError);
    assert_eq!(std::fs::read(&not_a_dir).expect("read"), b"occupied");
}
