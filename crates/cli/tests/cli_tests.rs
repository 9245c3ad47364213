//! CLI integration tests
use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

const QUTE_VARS: [&str; 7] = [
    "QUTE_MODE",
    "QUTE_URL",
    "QUTE_HTML",
    "QUTE_DATA_DIR",
    "QUTE_CONFIG_DIR",
    "QUTE_FIFO",
    "QUTE_USER_AGENT",
];

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("qute-reader");
    for var in QUTE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// Command with data and config dirs pointed into `tmp`.
fn sandboxed(tmp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cmd();
    cmd.env("QUTE_DATA_DIR", tmp.path().join("data"))
        .env("QUTE_CONFIG_DIR", tmp.path().join("config"));
    cmd
}

fn output_file(tmp: &TempDir) -> std::path::PathBuf {
    tmp.path().join("data").join("userscripts").join("readability.html")
}

fn empty_fifo(tmp: &TempDir) -> std::path::PathBuf {
    let fifo = tmp.path().join("fifo");
    fs::write(&fifo, "").unwrap();
    fifo
}

#[test]
fn test_cli_file_input() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("open -t -r "));

    let written = fs::read_to_string(output_file(&tmp)).unwrap();
    assert!(written.contains("Rust Traits in Practice"));
    assert!(written.contains("<p>Systems Weekly</p>"));
}

#[test]
fn test_cli_command_mode_from_env() {
    let tmp = TempDir::new().unwrap();
    let fifo = empty_fifo(&tmp);

    sandboxed(&tmp)
        .env("QUTE_MODE", "command")
        .env("QUTE_URL", "https://systems.example.net/2024/traits")
        .env("QUTE_HTML", get_fixture_path("article.html"))
        .env("QUTE_FIFO", &fifo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output = output_file(&tmp);
    assert_eq!(
        fs::read_to_string(&fifo).unwrap(),
        format!("open -t -r {}\n", output.display())
    );
    assert!(fs::read_to_string(output).unwrap().contains("Associated types"));
}

#[test]
fn test_cli_flags_instead_of_env() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["--mode", "command", "--url", "https://systems.example.net/traits"])
        .args(["--html", &get_fixture_path("article.html")])
        .arg("--data-dir")
        .arg(tmp.path())
        .arg("--config-dir")
        .arg(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("userscripts/readability.html").exists());
}

#[test]
fn test_cli_stdin_input() {
    let tmp = TempDir::new().unwrap();
    let html = fs::read_to_string(get_fixture_path("article.html")).unwrap();

    sandboxed(&tmp).arg("-").write_stdin(html).assert().success();

    assert!(output_file(&tmp).exists());
}

#[test]
fn test_cli_output_and_no_open() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("reader.html");

    sandboxed(&tmp)
        .args(["--no-open", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("open").not());

    assert!(output.exists());
    assert!(!output_file(&tmp).exists());
}

#[test]
fn test_cli_json() {
    let tmp = TempDir::new().unwrap();

    let assert = sandboxed(&tmp)
        .args(["--json", &get_fixture_path("article.html")])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["site_name"], "Systems Weekly");
    assert!(json["content"].as_str().unwrap().contains("Traits describe shared behavior"));
    assert!(!output_file(&tmp).exists());
}

#[test]
fn test_cli_theme_from_config() {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::copy(get_fixture_path("config.py"), config_dir.join("config.py")).unwrap();

    sandboxed(&tmp).arg(get_fixture_path("article.html")).assert().success();

    let written = fs::read_to_string(output_file(&tmp)).unwrap();
    let doc = scraper::Html::parse_document(&written);
    let style = scraper::Selector::parse("style").unwrap();
    let css: String = doc.select(&style).next().unwrap().text().collect();
    assert!(css.contains("background-color: #282828;"));
    assert!(css.contains("color: #b8bb26;"));
}

#[test]
fn test_cli_missing_url() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .env("QUTE_MODE", "hints")
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("message-error"))
        .stderr(predicate::str::contains("QUTE_URL"));
}

#[test]
fn test_cli_invalid_mode() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .env("QUTE_MODE", "tab")
        .env("QUTE_URL", "https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUTE_MODE"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_empty_content_reported_to_fifo() {
    let tmp = TempDir::new().unwrap();
    let fifo = empty_fifo(&tmp);

    sandboxed(&tmp)
        .env("QUTE_FIFO", &fifo)
        .arg(get_fixture_path("empty_content.html"))
        .assert()
        .failure();

    assert_eq!(
        fs::read_to_string(&fifo).unwrap(),
        "message-error No readable content found on the page\n"
    );
    assert!(!output_file(&tmp).exists());
}

#[test]
fn test_cli_verbose() {
    let tmp = TempDir::new().unwrap();

    sandboxed(&tmp)
        .args(["-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("qute-reader"))
        .stderr(predicate::str::contains("Reader view written to"));
}

#[test]
fn test_cli_completions() {
    for shell in ["bash", "elvish", "fish", "powershell", "zsh"] {
        cmd()
            .args(["--completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("qute-reader"));
    }
}

#[test]
fn test_cli_fixture_paths_exist() {
    for name in ["article.html", "empty_content.html", "config.py"] {
        assert!(Path::new(&get_fixture_path(name)).exists(), "missing fixture {}", name);
    }
}
