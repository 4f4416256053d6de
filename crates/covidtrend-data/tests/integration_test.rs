//! End-to-end tests for fetching, reading and selecting.

use covidtrend_common::test_utils::{init_test_logging, sample_csv, SAMPLE_DATES, SAMPLE_ROWS};
use covidtrend_common::{Case, TrendError};
use covidtrend_config::SourceConfig;
use covidtrend_data::{cleanup_dir, Fetcher, Manifest, Reader, Selector, MANIFEST_FILE};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve `sample_csv()` for every path except those containing `missing`.
async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let response = if path.contains("missing") {
                    "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                        .to_string()
                } else {
                    let body = sample_csv();
                    format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: text/csv\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}/")
}

fn source(base_url: String, dir: &Path) -> SourceConfig {
    SourceConfig {
        base_url,
        data_dir: dir.to_path_buf(),
        timeout_seconds: 5,
        ..SourceConfig::default()
    }
}

#[tokio::test]
async fn test_update_writes_files_and_manifest() {
    init_test_logging();
    let base = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(&source(base.clone(), dir.path())).unwrap();

    let manifest = fetcher.update().await.unwrap();

    let names: Vec<&str> = manifest.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "time_series_19-covid-Confirmed",
            "time_series_19-covid-Recovered",
            "time_series_19-covid-Deaths",
        ]
    );
    for resource in &manifest.resources {
        assert_eq!(resource.rows, SAMPLE_ROWS);
        assert_eq!(resource.bytes, sample_csv().len() as u64);
        assert!(resource.url.starts_with(&base));
    }
    for case in Case::ALL {
        let written = std::fs::read_to_string(dir.path().join(case.file_name())).unwrap();
        assert_eq!(written, sample_csv());
    }

    let loaded = Manifest::load(dir.path()).unwrap();
    assert_eq!(loaded, manifest);
    assert_eq!(loaded.name, "csse_covid_19_time_series");
}

#[tokio::test]
async fn test_update_overwrites_previous_files() {
    let base = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join(Case::Deaths.file_name());
    std::fs::write(&stale, "stale").unwrap();

    Fetcher::new(&source(base, dir.path()))
        .unwrap()
        .update()
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&stale).unwrap(), sample_csv());
}

#[tokio::test]
async fn test_http_error_aborts_update() {
    let base = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(&source(format!("{base}missing/"), dir.path())).unwrap();

    let err = fetcher.update().await.unwrap_err();

    assert!(matches!(err, TrendError::Network { .. }), "got {err:?}");
    assert!(!dir.path().join(MANIFEST_FILE).exists());
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(&source(format!("http://{addr}/"), dir.path())).unwrap();

    let err = fetcher.update().await.unwrap_err();
    assert!(matches!(err, TrendError::Network { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_read_select_cleanup() {
    let base = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Fetcher::new(&source(base, dir.path())).unwrap();
    fetcher.update().await.unwrap();

    let table = Reader::new(dir.path()).read_confirmed().unwrap();
    assert_eq!(table.headers().len(), 4 + SAMPLE_DATES.len());
    assert_eq!(table.len(), SAMPLE_ROWS);

    let selector = Selector::default();
    let france = selector.select(&table, "France").unwrap();
    assert_eq!(france.labels().first().map(String::as_str), Some("22/1"));
    assert_eq!(france.labels().last().map(String::as_str), Some("31/1"));
    assert_eq!(france.latest(), Some(5));

    assert_eq!(fetcher.cleanup().unwrap(), 4);
    assert_eq!(cleanup_dir(dir.path()).unwrap(), 0);
    assert!(Reader::new(dir.path()).read_confirmed().unwrap_err().is_not_found());
}
