//! Integration tests for the Biblio CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Address with nothing listening on it
fn dead_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Command with an isolated credential file and no inherited backend settings
fn biblio(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.env(
        "BIBLIO_CREDENTIALS_PATH",
        temp_dir.path().join("credentials.json"),
    )
    .env_remove("BIBLIO_API_URL")
    .env_remove("BIBLIO_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("books"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("similar"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("biblio"));
}

#[test]
fn test_books_help() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.args(["books", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse the book catalog"))
        .stdout(predicate::str::contains("--search"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_login_missing_password() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.args(["login", "--email", "reader@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn test_invalid_timeout() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.args(["--timeout", "0", "books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_books_without_backend_shows_demo_data() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "--timeout", "5", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Using demo data. Backend connection failed.",
        ))
        .stdout(predicate::str::contains("The Great Gatsby"))
        .stdout(predicate::str::contains("Showing 6 of 6 books (source: fallback)"));
}

#[test]
fn test_books_search_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = biblio(&temp_dir)
        .args([
            "--api-url",
            &dead_backend(),
            "books",
            "--search",
            "TOLKIEN",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["source"], "fallback");
    assert_eq!(view["notice"], "Using demo data. Backend connection failed.");
    assert_eq!(view["total"], 6);
    assert_eq!(view["books"].as_array().unwrap().len(), 1);
    assert_eq!(view["books"][0]["title"], "The Hobbit");
}

#[test]
fn test_books_search_no_match() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "books", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books match 'zzz'"));
}

#[test]
fn test_health_without_backend_fails() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn test_whoami_requires_login() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "whoami"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_without_session_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
}

#[test]
fn test_dashboard_requires_login() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_similar_help() {
    let mut cmd = Command::cargo_bin("biblio").unwrap();
    cmd.args(["similar", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("BOOK_ID"));
}

#[test]
fn test_reviews_without_backend_fails() {
    let temp_dir = TempDir::new().unwrap();
    biblio(&temp_dir)
        .args(["--api-url", &dead_backend(), "reviews", "3f2a9c1e"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch reviews for book 3f2a9c1e"));
}
