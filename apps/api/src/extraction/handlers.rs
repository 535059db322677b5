//! Axum route handlers for the Extraction API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::DocumentFormat;
use crate::errors::AppError;
use crate::extraction::models::{ExtractedFact, ExtractionResult};
use crate::extraction::vocabulary::SkillVocabulary;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// Replaces the configured vocabulary for this request only.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub pattern_library_version: u32,
}

/// The extraction record plus its flattened fact list.
#[derive(Debug, Serialize)]
pub struct ExtractionResponse {
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub facts: Vec<ExtractedFact>,
}

impl From<ExtractionResult> for ExtractionResponse {
    fn from(result: ExtractionResult) -> Self {
        let facts = result.facts();
        Self { result, facts }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.extractor.vocabulary().entries().to_vec(),
        pattern_library_version: state.extractor.patterns().version,
    })
}

/// POST /api/v1/resume/analyze
///
/// Runs extraction over already-converted plain text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ExtractionResponse>, AppError> {
    let extractor = match request.skills {
        Some(skills) => state.extractor.with_vocabulary(SkillVocabulary::new(skills)?),
        None => (*state.extractor).clone(),
    };

    let result = tokio::task::spawn_blocking(move || extractor.extract(&request.text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

    Ok(Json(result.into()))
}

/// POST /api/v1/resume/upload
///
/// Multipart upload with a single `file` part (PDF, DOCX or plain text).
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let format = DocumentFormat::detect(field.content_type(), file_name.as_deref())?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        info!(
            "Upload received: {} ({:?}, {} bytes)",
            file_name.as_deref().unwrap_or("<unnamed>"),
            format,
            bytes.len()
        );

        let extractor = state.extractor.clone();
        let result = tokio::task::spawn_blocking(move || extractor.extract_document(&bytes, format))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

        return Ok(Json(result.into()));
    }

    Err(AppError::Validation(
        "multipart body must contain a 'file' part".to_string(),
    ))
}
