//! End-to-end provisioning against a local release server.

use assert_cmd::Command;
use tender_launcher::platform::ReleaseTarget;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn tender(cache: &std::path::Path, base_url: &str, cwd: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tender").unwrap();
    cmd.current_dir(cwd)
        .env_remove("TENDER_BINARY_PATH")
        .env("TENDER_CACHE_DIR", cache)
        .env("TENDER_RELEASE_BASE_URL", base_url);
    cmd
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn test_first_run_downloads_then_reuses_cache() {
    let Ok(target) = ReleaseTarget::map(std::env::consts::OS, std::env::consts::ARCH) else {
        return;
    };
    let asset = target.asset_name("tender", VERSION);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v{VERSION}/{asset}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"#!/bin/sh\necho \"downloaded $*\"\nexit 5\n".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let cwd = tempfile::tempdir().unwrap();

    for _ in 0..2 {
        tender(cache.path(), &server.uri(), cwd.path())
            .arg("ls")
            .assert()
            .code(5)
            .stdout("downloaded ls\n");
    }

    let binary = cache.path().join("tender").join("cli").join(VERSION).join("tender");
    assert!(binary.is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_download_reports_url() {
    let Ok(target) = ReleaseTarget::map(std::env::consts::OS, std::env::consts::ARCH) else {
        return;
    };
    let asset = target.asset_name("tender", VERSION);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = tempfile::tempdir().unwrap();
    let cwd = tempfile::tempdir().unwrap();
    let url = format!("{}/v{VERSION}/{asset}", server.uri());

    tender(cache.path(), &server.uri(), cwd.path())
        .arg("ls")
        .assert()
        .code(1)
        .stderr(predicates::str::contains(format!("Tried: {url}")))
        .stderr(predicates::str::contains("HTTP 404 Not Found"));

    let version_dir = cache.path().join("tender").join("cli").join(VERSION);
    assert_eq!(std::fs::read_dir(version_dir).unwrap().count(), 0);
}
