use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>artificial</title>
  <entry>
    <title>Open weights model tops the leaderboard</title>
    <published>2999-01-01T08:00:00+00:00</published>
  </entry>
  <entry>
    <title>Old news</title>
    <published>2001-01-01T08:00:00+00:00</published>
  </entry>
</feed>
"#;

async fn feed_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/r/artificial/.rss"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ATOM_FEED))
        .mount(&server)
        .await;
    server
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("trendpost.toml");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("[linkedin]"));
    assert!(content.contains("api_version = \"202306\""));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("trendpost.toml");
    fs::write(&config_path, "# mine\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine\n");
}

#[test]
fn run_without_credentials_fails_before_fetching() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.current_dir(dir.path())
        .env_remove("LINKEDIN_ACCESS_TOKEN")
        .env_remove("LINKEDIN_USER_ID")
        // Unroutable, so any fetch attempt would surface as a network error
        .env("TRENDPOST__FEED__URL", "http://127.0.0.1:9/feed")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINKEDIN_ACCESS_TOKEN"))
        .stdout(predicate::str::contains("Generated LinkedIn Post").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn digest_prints_recent_titles_only() {
    let server = feed_server().await;
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.current_dir(dir.path())
        .env(
            "TRENDPOST__FEED__URL",
            format!("{}/r/artificial/.rss", server.uri()),
        )
        .arg("digest")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Open weights model tops the leaderboard",
        ))
        .stdout(predicate::str::contains("Old news").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn dotenv_log_filter_applies_to_logging() {
    let server = feed_server().await;
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").expect("write .env");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env(
            "TRENDPOST__FEED__URL",
            format!("{}/r/artificial/.rss", server.uri()),
        )
        .arg("digest")
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded .env file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_quit_exits_without_posting() {
    let server = feed_server().await;
    Mock::given(method("POST"))
        .and(path("/rest/posts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.current_dir(dir.path())
        .env("LINKEDIN_ACCESS_TOKEN", "test-token")
        .env("LINKEDIN_USER_ID", "abc123")
        .env("TRENDPOST__LLM__PROVIDER", "stub")
        .env(
            "TRENDPOST__FEED__URL",
            format!("{}/r/artificial/.rss", server.uri()),
        )
        .env("TRENDPOST__LINKEDIN__BASE_URL", server.uri())
        .arg("run")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated LinkedIn Post:"))
        .stdout(predicate::str::contains("Exiting without posting."));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_invalid_utf8_input_regenerates() {
    let server = feed_server().await;
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    let output = cmd
        .current_dir(dir.path())
        .env("LINKEDIN_ACCESS_TOKEN", "test-token")
        .env("LINKEDIN_USER_ID", "abc123")
        .env("TRENDPOST__LLM__PROVIDER", "stub")
        .env(
            "TRENDPOST__FEED__URL",
            format!("{}/r/artificial/.rss", server.uri()),
        )
        .env("TRENDPOST__LINKEDIN__BASE_URL", server.uri())
        .arg("run")
        .write_stdin(&b"\xff\nq\n"[..])
        .output()
        .expect("run trendpost");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Generated LinkedIn Post:").count(), 2);
    assert!(stdout.contains("Exiting without posting."));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_post_publishes_to_linkedin() {
    let server = feed_server().await;
    Mock::given(method("POST"))
        .and(path("/rest/posts"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("LinkedIn-Version", "202306"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    cmd.current_dir(dir.path())
        .env("LINKEDIN_ACCESS_TOKEN", "test-token")
        .env("LINKEDIN_USER_ID", "abc123")
        .env("TRENDPOST__LLM__PROVIDER", "stub")
        .env(
            "TRENDPOST__FEED__URL",
            format!("{}/r/artificial/.rss", server.uri()),
        )
        .env("TRENDPOST__LINKEDIN__BASE_URL", server.uri())
        .arg("run")
        .write_stdin("r\np\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status Code: 201"));
}

#[test]
fn doctor_json_reports_credentials_without_values() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("trendpost");
    let output = cmd
        .current_dir(dir.path())
        .env("LINKEDIN_ACCESS_TOKEN", "super-secret-token")
        .env_remove("LINKEDIN_USER_ID")
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("super-secret-token"));

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["config"]["status"], "ok");
    assert_eq!(value["linkedin"]["status"], "warn");
    assert_eq!(value["overall"], "warn");
}
