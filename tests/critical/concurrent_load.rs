//! Many simultaneous downloads into one storage directory.
//! Each must produce its own artifact with the exact bytes served for it.

use std::collections::HashSet;

use futures_util::future::join_all;
use media_downloader_core::{DownloadService, HttpClient, MediaPolicy};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::support::critical_utils::stored_files;
use crate::support::socket_guard::{socket_skip_return, start_mock_server_or_skip};

const CONCURRENT_DOWNLOADS: usize = 16;

#[tokio::test]
async fn p1_concurrent_downloads_produce_distinct_complete_artifacts() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return socket_skip_return();
    };
    let temp_dir = TempDir::new().expect("temp dir");

    for i in 0..CONCURRENT_DOWNLOADS {
        let body = vec![u8::try_from(i).expect("small index"); 4096 + i];
        Mock::given(method("GET"))
            .and(path(format!("/clip/{i}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "video/webm"))
            .mount(&mock_server)
            .await;
    }

    let service = DownloadService::new(HttpClient::new(), temp_dir.path(), MediaPolicy::MediaOnly);
    let urls: Vec<String> = (0..CONCURRENT_DOWNLOADS)
        .map(|i| format!("{}/clip/{i}", mock_server.uri()))
        .collect();
    let outcomes = join_all(urls.iter().map(|url| service.download(Some(url)))).await;

    let mut names = HashSet::new();
    for (i, outcome) in outcomes.into_iter().enumerate() {
        let outcome = outcome.expect("download succeeds");
        assert_eq!(outcome.bytes, (4096 + i) as u64);
        let stored = std::fs::read(&outcome.path).expect("read artifact");
        assert!(stored.iter().all(|b| usize::from(*b) == i), "artifact {i} mixed bytes");
        assert!(names.insert(outcome.filename));
    }
    assert_eq!(stored_files(temp_dir.path()).len(), CONCURRENT_DOWNLOADS);
}
