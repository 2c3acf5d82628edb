//! HTTP endpoint integration tests using axum-test

use std::io::{Cursor, Write};

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::{app, AppState};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Create a test server with the full router and a scratch upload directory
fn create_test_server() -> (TestServer, TempDir) {
    let upload_dir = tempfile::tempdir().unwrap();
    let state = AppState::new(upload_dir.path().to_path_buf());
    let server = TestServer::new(app(state, 1024 * 1024)).unwrap();
    (server, upload_dir)
}

fn uploads_left(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

/// Word package whose paragraphs are `lines`
fn docx_bytes(lines: &[&str], title: &str, creator: &str) -> Vec<u8> {
    let paragraphs: String = lines
        .iter()
        .map(|line| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", line))
        .collect();
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        paragraphs
    );
    let core = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>{}</dc:creator></cp:coreProperties>"#,
        title, creator
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [("word/document.xml", body), ("docProps/core.xml", core)] {
        zip.start_file(name, FileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn compliant_manual() -> Vec<u8> {
    docx_bytes(
        &[
            "Quality Manual",
            "Document number: ALS-ENG-001",
            "Version: B",
            "Status: approved",
            "Effective 2024-01-15",
            "© ALSTOM",
            "Issued by Alstom",
            "Confidential",
            "Part of the AMS",
            "Page 1 of 10",
        ],
        "Quality Manual",
        "J. Smith",
    )
}

#[tokio::test]
async fn test_health_returns_200() {
    let (server, _dir) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "verifier-server");
}

#[tokio::test]
async fn test_verify_compliant_docx() {
    let (server, dir) = create_test_server();

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(compliant_manual())
            .file_name("Quality Manual.docx")
            .mime_type(DOCX_MIME),
    );
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["file_name"], "Quality Manual.docx");
    assert_eq!(json["kind"], "word_document");
    assert_eq!(json["locale"], "en");
    assert_eq!(json["rule_count"], 13);
    assert_eq!(json["passed_count"], 13);
    assert_eq!(json["results"]["title_present"]["passed"], true);
    assert_eq!(
        json["results"]["identification_number"]["evidence"],
        json!(["ALS-ENG-001"])
    );
    assert!(json["checked_at"].as_str().is_some());

    assert_eq!(uploads_left(&dir), 0);
}

#[tokio::test]
async fn test_verify_uses_requested_language() {
    let (server, _dir) = create_test_server();

    let form = MultipartForm::new()
        .add_text("language", "de")
        .add_part(
            "file",
            Part::bytes(docx_bytes(&["Notes"], "", "")).file_name("notes.docx"),
        );
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["locale"], "de");
    assert_eq!(json["results"]["author_verified"]["passed"], false);
    assert_eq!(
        json["results"]["author_verified"]["message"],
        "Dokument muss einen Autor angeben."
    );
}

#[tokio::test]
async fn test_verify_rejects_unsupported_format() {
    let (server, dir) = create_test_server();

    let form = MultipartForm::new()
        .add_part("file", Part::text("plain notes").file_name("notes.txt"));
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNSUPPORTED_FORMAT");
    assert_eq!(uploads_left(&dir), 0);
}

#[tokio::test]
async fn test_verify_requires_file_part() {
    let (server, _dir) = create_test_server();

    let form = MultipartForm::new().add_text("language", "en");
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn test_verify_requires_file_name() {
    let (server, _dir) = create_test_server();

    let form = MultipartForm::new().add_part("file", Part::bytes(compliant_manual()));
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "No file selected");
}

#[tokio::test]
async fn test_verify_reports_extraction_failure() {
    let (server, dir) = create_test_server();

    let form = MultipartForm::new()
        .add_part("file", Part::bytes(b"not a pdf".to_vec()).file_name("broken.pdf"));
    let response = server.post("/api/verify").multipart(form).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "EXTRACTION_FAILED");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Error during PDF verification"));
    assert_eq!(uploads_left(&dir), 0);
}

#[tokio::test]
async fn test_evaluate_extracted_document() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/evaluate")
        .json(&json!({
            "document": {
                "kind": "pdf",
                "text": "ALS-ENG-001\nPage 1 of 2",
                "page_count": 2
            },
            "language": "de"
        }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["kind"], "pdf");
    assert_eq!(json["locale"], "de");
    assert_eq!(json["rule_count"], 10);
    assert!(json.get("file_name").is_none());
    assert_eq!(json["results"]["page_count"]["passed"], true);
    assert_eq!(json["results"]["page_count"]["evidence"], 2);
    assert_eq!(json["results"]["identification_number"]["passed"], true);
}

#[tokio::test]
async fn test_evaluate_treats_empty_title_as_missing() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/evaluate")
        .json(&json!({
            "document": { "kind": "word_document", "title": "", "author": "" }
        }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["results"]["title_present"]["passed"], false);
    assert_eq!(json["results"]["title_present"]["evidence"], serde_json::Value::Null);
    assert_eq!(json["results"]["author_verified"]["evidence"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_evaluate_defaults_to_english() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/evaluate")
        .json(&json!({ "document": { "kind": "spreadsheet" } }))
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["locale"], "en");
    assert_eq!(json["passed_count"], 0);
}

#[tokio::test]
async fn test_list_rules_for_kind() {
    let (server, _dir) = create_test_server();

    let response = server
        .get("/api/rules")
        .add_query_param("kind", "pdf")
        .add_query_param("language", "fr")
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["locale"], "de");
    let rule_sets = json["rule_sets"].as_array().unwrap();
    assert_eq!(rule_sets.len(), 1);
    assert_eq!(rule_sets[0]["kind"], "pdf");
    assert_eq!(rule_sets[0]["rules"][0]["id"], "page_count");
    assert_eq!(rule_sets[0]["rules"][0]["message"], "PDF muss Seiten haben.");
}

#[tokio::test]
async fn test_list_all_rules() {
    let (server, _dir) = create_test_server();

    let response = server.get("/api/rules").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let counts: Vec<usize> = json["rule_sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|set| set["rules"].as_array().unwrap().len())
        .collect();
    assert_eq!(counts, vec![13, 10, 5]);
}

#[tokio::test]
async fn test_list_rules_rejects_unknown_kind() {
    let (server, _dir) = create_test_server();

    let response = server.get("/api/rules").add_query_param("kind", "video").await;
    response.assert_status_bad_request();
}
