//! End-to-end tests for the cardpush binary
//!
//! Each test runs the real binary against a wiremock CardDAV server and
//! checks:
//! - which contacts were PUT, and in what order they stop
//! - exit status and user-facing messages
//! - that nothing reaches the server when the run must abort early

use assert_cmd::Command;
use cardpush_cli::ids::generate_id;
use cardpush_cli::vcard::{is_complete, split_records};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    matchers::{any, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const EMAIL: &str = "user@example.com";
const PASSWORD: &str = "secret";
/// base64("user@example.com:secret")
const AUTH: &str = "Basic dXNlckBleGFtcGxlLmNvbTpzZWNyZXQ=";

const ADA: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ada Lovelace\r\nEMAIL:ada@example.com\r\nEND:VCARD";
const ALAN: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Alan Turing\r\nTEL:+441234567\r\nEND:VCARD";
const GRACE: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Grace Hopper\r\nEMAIL;TYPE=work:grace@example.com\r\nEND:VCARD";

/// Helper to write a contacts file the way exporters do (CRLF, trailing newline)
fn write_contacts(dir: &TempDir, cards: &[&str]) -> (PathBuf, String) {
    let content = format!("{}\r\n", cards.join("\r\n"));
    let file = dir.path().join("contacts.vcf");
    fs::write(&file, &content).expect("Failed to write contacts file");
    (file, content)
}

/// Ids of the complete records in upload order
fn uploaded_ids(content: &str) -> Vec<String> {
    split_records(content)
        .iter()
        .filter(|block| is_complete(block))
        .map(|block| generate_id(block))
        .collect()
}

fn contact_path(id: &str) -> String {
    format!("/{}/ab/personal/{}.vcf", EMAIL, id)
}

async fn expect_put(server: &MockServer, id: &str, status: u16, times: u64) {
    Mock::given(method("PUT"))
        .and(path(contact_path(id)))
        .and(header("content-type", "text/vcard"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(status).set_body_string("Conflict"))
        .expect(times)
        .mount(server)
        .await;
}

async fn expect_no_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

fn cardpush(dir: &TempDir, server: &MockServer, file: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("cardpush").unwrap();
    cmd.current_dir(dir.path())
        .arg("--email")
        .arg(EMAIL)
        .arg("--password")
        .arg(PASSWORD)
        .arg("--file")
        .arg(file)
        .arg("--server")
        .arg(server.uri());
    cmd
}

#[tokio::test]
async fn test_import_uploads_every_contact() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA, ALAN, GRACE]);

    for id in uploaded_ids(&content) {
        expect_put(&server, &id, 201, 1).await;
    }

    cardpush(&dir, &server, &file)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 contact(s) uploaded"));
}

#[tokio::test]
async fn test_import_stops_at_first_rejection() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA, ALAN, GRACE]);
    let ids = uploaded_ids(&content);

    expect_put(&server, &ids[0], 201, 1).await;
    expect_put(&server, &ids[1], 409, 1).await;
    expect_put(&server, &ids[2], 201, 0).await;

    cardpush(&dir, &server, &file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("#2 of 3"))
        .stderr(predicate::str::contains("HTTP 409"))
        .stderr(predicate::str::contains("--start-index 1"));
}

#[tokio::test]
async fn test_existing_contact_200_is_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA]);

    expect_put(&server, &uploaded_ids(&content)[0], 200, 1).await;

    cardpush(&dir, &server, &file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 200"));
}

#[tokio::test]
async fn test_start_index_resumes_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA, ALAN, GRACE]);
    let ids = uploaded_ids(&content);

    expect_put(&server, &ids[0], 201, 0).await;
    expect_put(&server, &ids[1], 201, 1).await;
    expect_put(&server, &ids[2], 201, 1).await;

    cardpush(&dir, &server, &file)
        .arg("--start-index")
        .arg("1")
        .arg("--batch-size")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 contact(s) uploaded (1 skipped, 1 cooldown(s))"));
}

#[tokio::test]
async fn test_duplicate_records_abort_before_upload() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    // Both ALAN blocks carry the preceding line break, so they are identical.
    let (file, _) = write_contacts(&dir, &[ADA, ALAN, ALAN]);

    expect_no_requests(&server).await;

    cardpush(&dir, &server, &file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Identifier collision"))
        .stderr(predicate::str::contains("#2 and #3"));
}

#[tokio::test]
async fn test_with_email_selection_skips_contacts_without_email() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA, ALAN, GRACE]);
    let ids = uploaded_ids(&content);

    expect_put(&server, &ids[0], 201, 1).await;
    expect_put(&server, &ids[1], 201, 0).await;
    expect_put(&server, &ids[2], 201, 1).await;

    cardpush(&dir, &server, &file)
        .arg("--select")
        .arg("with-email")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 contact(s) uploaded"));
}

#[tokio::test]
async fn test_dry_run_lists_ids_without_network() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, content) = write_contacts(&dir, &[ADA, ALAN]);
    let ids = uploaded_ids(&content);

    expect_no_requests(&server).await;

    cardpush(&dir, &server, &file)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(ids[0].as_str()))
        .stdout(predicate::str::contains(ids[1].as_str()))
        .stdout(predicate::str::contains("2 contact(s) would be uploaded"));
}

#[tokio::test]
async fn test_missing_file_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    expect_no_requests(&server).await;

    cardpush(&dir, &server, &dir.path().join("missing.vcf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File operation failed"));
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (file, _) = write_contacts(&dir, &[ADA]);

    expect_no_requests(&server).await;

    cardpush(&dir, &server, &file)
        .arg("--batch-size")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch size must be greater than zero"));
}

#[test]
fn test_required_flags() {
    Command::cargo_bin("cardpush")
        .unwrap()
        .env_remove("CARDPUSH_EMAIL")
        .env_remove("CARDPUSH_PASSWORD")
        .env_remove("CARDPUSH_SERVER")
        .arg("--file")
        .arg("contacts.vcf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_server_flag_is_optional() {
    let dir = TempDir::new().unwrap();
    let (file, _) = write_contacts(&dir, &[ADA]);

    Command::cargo_bin("cardpush")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("CARDPUSH_SERVER")
        .arg("-e")
        .arg(EMAIL)
        .arg("-p")
        .arg(PASSWORD)
        .arg("-f")
        .arg(&file)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 contact(s) would be uploaded"));
}
