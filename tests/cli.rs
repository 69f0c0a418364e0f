use assert_cmd::Command;
use predicates::prelude::*;

fn iotdash() -> Command {
    let mut cmd = Command::cargo_bin("iotdash").unwrap();
    cmd.env_remove("IOTDASH_API_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_options() {
    iotdash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("--size"))
        .stdout(predicate::str::contains("--refresh"))
        .stdout(predicate::str::contains("IOTDASH_API_URL"));
}

#[test]
fn invalid_url_exits_before_touching_terminal() {
    iotdash()
        .args(["--api-url", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid API URL"));
}

#[test]
fn non_http_scheme_is_rejected() {
    iotdash()
        .args(["--api-url", "ftp://controller.local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme 'ftp'"));
}

#[test]
fn url_from_environment_is_validated() {
    iotdash()
        .env("IOTDASH_API_URL", "controller:8000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API URL 'controller:8000'"));
}

#[test]
fn startup_errors_reach_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("iotdash.log");

    iotdash()
        .args(["--api-url", "gopher://x"])
        .arg("--log")
        .arg(&log)
        .assert()
        .failure();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Starting iotdash"));
    assert!(contents.contains("unsupported scheme 'gopher'"));
}

#[test]
fn log_level_follows_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("iotdash.log");

    iotdash()
        .env("RUST_LOG", "error")
        .args(["--api-url", "gopher://x"])
        .arg("--log")
        .arg(&log)
        .assert()
        .failure();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(!contents.contains("Starting iotdash"));
    assert!(contents.contains("unsupported scheme 'gopher'"));
}

#[test]
fn unwritable_log_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();

    iotdash()
        .arg("--log")
        .arg(dir.path().join("missing").join("iotdash.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
