//! API handlers for the verifier server
//!
//! Provides REST endpoints for:
//! - File upload verification
//! - Verification of pre-extracted documents
//! - Rule listing

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    Json,
};
use compliance_engine::{Localizer, RuleSet};
use serde::{Deserialize, Serialize};
use shared_types::{Document, DocumentKind, Locale, VerificationReport};
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::upload;
use crate::AppState;

/// Language used when a request does not name one
const DEFAULT_LANGUAGE: &str = "en";

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "verifier-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Verification response
#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    /// Client-side name of the uploaded file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// RFC 3339 timestamp of the check
    pub checked_at: String,
    pub passed_count: usize,
    pub rule_count: usize,
    #[serde(flatten)]
    pub report: VerificationReport,
}

impl VerifyResponse {
    fn new(report: VerificationReport, file_name: Option<String>) -> Self {
        Self {
            success: true,
            file_name,
            checked_at: chrono::Utc::now().to_rfc3339(),
            passed_count: report.passed_count(),
            rule_count: report.len(),
            report,
        }
    }
}

/// Handler: POST /api/verify
///
/// Multipart form with a `file` part and an optional `language` part.
pub async fn handle_verify_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VerifyResponse>, ServerError> {
    let mut file_part: Option<(Option<String>, Bytes)> = None;
    let mut language = default_language();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await?;
                file_part = Some((file_name, data));
            }
            Some("language") => language = field.text().await?,
            _ => {}
        }
    }

    let (file_name, data) = file_part.ok_or(ServerError::NoFileProvided)?;
    let file_name = file_name
        .filter(|name| !name.is_empty())
        .ok_or(ServerError::NoFileSelected)?;

    if DocumentKind::from_extension(upload::extension(&file_name)).is_none() {
        return Err(ServerError::UnsupportedFormat(file_name));
    }

    let locale = Locale::from_code(&language);
    info!(
        "Verify request: file={}, size={} bytes, language={}",
        file_name,
        data.len(),
        locale.code()
    );

    let path = upload::store(&state.upload_dir, &file_name, &data)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to store upload: {}", e)))?;
    debug!("Stored upload at {}", path.display());

    let engine = Arc::clone(&state.engine);
    let extractors = Arc::clone(&state.extractors);
    let stored = path.clone();
    let outcome =
        tokio::task::spawn_blocking(move || engine.verify_path(&stored, locale, &extractors))
            .await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!("Failed to remove upload {}: {}", path.display(), e);
    }

    let report = outcome.map_err(|e| ServerError::Internal(e.to_string()))??;

    Ok(Json(VerifyResponse::new(report, Some(file_name))))
}

/// Evaluate request body
#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub document: Document,

    /// Language code; anything other than "en" yields German messages
    #[serde(default = "default_language")]
    pub language: String,
}

/// Handler: POST /api/evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Json<VerifyResponse> {
    let locale = Locale::from_code(&req.language);
    debug!(
        "Evaluate request: kind={}, {} chars of text",
        req.document.kind.label(),
        req.document.text.chars().count()
    );

    let report = state.engine.verify(&req.document, locale);
    Json(VerifyResponse::new(report, None))
}

/// Rule listing query parameters
#[derive(Deserialize)]
pub struct RulesQuery {
    /// Restrict the listing to one document kind
    pub kind: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct RuleInfo {
    pub id: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct RuleSetInfo {
    pub kind: DocumentKind,
    pub rules: Vec<RuleInfo>,
}

impl RuleSetInfo {
    fn new(rule_set: &RuleSet, locale: Locale) -> Self {
        Self {
            kind: rule_set.kind(),
            rules: rule_set
                .rules()
                .iter()
                .map(|rule| RuleInfo {
                    id: rule.id,
                    message: Localizer::resolve(&rule.messages, locale),
                })
                .collect(),
        }
    }
}

/// Rule list response
#[derive(Serialize)]
pub struct RuleListResponse {
    pub success: bool,
    pub locale: Locale,
    pub rule_sets: Vec<RuleSetInfo>,
}

/// Handler: GET /api/rules
pub async fn handle_list_rules(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> Result<Json<RuleListResponse>, ServerError> {
    let locale = Locale::from_code(query.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

    let kinds = match query.kind.as_deref() {
        Some(kind) => vec![parse_kind(kind)?],
        None => DocumentKind::ALL.to_vec(),
    };

    let rule_sets = kinds
        .into_iter()
        .map(|kind| RuleSetInfo::new(state.engine.rule_set(kind), locale))
        .collect();

    Ok(Json(RuleListResponse {
        success: true,
        locale,
        rule_sets,
    }))
}

fn parse_kind(kind: &str) -> Result<DocumentKind, ServerError> {
    match kind.to_lowercase().as_str() {
        "word" | "word_document" | "docx" => Ok(DocumentKind::WordDocument),
        "pdf" => Ok(DocumentKind::Pdf),
        "spreadsheet" | "excel" | "xlsx" => Ok(DocumentKind::Spreadsheet),
        other => Err(ServerError::InvalidRequest(format!(
            "Invalid kind '{}'. Must be 'word', 'pdf', or 'spreadsheet'",
            other
        ))),
    }
}
