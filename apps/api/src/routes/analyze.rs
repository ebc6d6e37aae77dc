//! Axum route handlers for the resume analysis API.
//!
//! Uploaded bytes are staged in a named temp file, extracted, and the temp
//! file is dropped on every exit path — including extraction failure.

use std::io::Write;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::extract::{extract_text, DocumentFormat};
use crate::state::AppState;

// Closed vocabulary offered to the UI. Values are passed opaquely into the
// prompt template; the server does not validate beyond presence.
const DESIGNATIONS: &[&str] = &[
    "Data Scientist",
    "Data Analyst",
    "Software Engineer",
    "Backend Engineer",
    "Frontend Engineer",
    "Full Stack Engineer",
    "DevOps Engineer",
    "Product Manager",
];

const EXPERIENCE_LEVELS: &[&str] = &["Fresher", "1-3 years", "3-5 years", "5-10 years", "10+ years"];

const DOMAINS: &[&str] = &[
    "Finance",
    "Healthcare",
    "E-commerce",
    "Education",
    "Manufacturing",
    "Technology",
];

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub designations: &'static [&'static str],
    pub experience_levels: &'static [&'static str],
    pub domains: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// The closed vocabulary the upload form presents for the three context
/// parameters.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        designations: DESIGNATIONS,
        experience_levels: EXPERIENCE_LEVELS,
        domains: DOMAINS,
    })
}

/// POST /api/v1/analyze
///
/// Multipart form: `file` (PDF/DOCX) plus `designation`, `experience` and
/// `domain` text fields. Extracts the document text and returns the LLM
/// critique for the selected context.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let designation = upload.require_field("designation")?;
    let experience = upload.require_field("experience")?;
    let domain = upload.require_field("domain")?;

    let text = stage_and_extract(&upload).await?;

    let analysis = state
        .analyzer
        .analyze_resume(&text, &designation, &experience, &domain)
        .await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

/// POST /api/v1/summarize
///
/// Multipart form: `file` only. Extracts the document text and returns a
/// context-free summary.
pub async fn handle_summarize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = stage_and_extract(&upload).await?;

    let summary = state.analyzer.summarize(&text).await?;

    Ok(Json(SummarizeResponse { summary }))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload plumbing
// ────────────────────────────────────────────────────────────────────────────

struct Upload {
    file_name: String,
    file_bytes: Bytes,
    fields: Vec<(String, String)>,
}

impl Upload {
    fn require_field(&self, name: &str) -> Result<String, AppError> {
        self.fields
            .iter()
            .find(|(key, value)| key == name && !value.trim().is_empty())
            .map(|(_, value)| value.clone())
            .ok_or_else(|| AppError::Validation(format!("Missing form field '{name}'")))
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file_name = None;
    let mut file_bytes = None;
    let mut fields = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                file_bytes = Some(field.bytes().await?);
            }
            Some(other) => {
                let key = other.to_string();
                fields.push((key, field.text().await?));
            }
            None => {}
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing form field 'file'".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;

    Ok(Upload {
        file_name,
        file_bytes,
        fields,
    })
}

/// Writes the uploaded bytes to a temp file, extracts text according to the
/// file name's extension, and rejects uploads that yield no text. The temp
/// file lives exactly as long as the blocking extraction task.
async fn stage_and_extract(upload: &Upload) -> Result<String, AppError> {
    use anyhow::Context;

    let format = DocumentFormat::from_file_name(&upload.file_name);

    let mut temp = NamedTempFile::new().context("Failed to create temp file for upload")?;
    temp.write_all(&upload.file_bytes)
        .and_then(|()| temp.flush())
        .context("Failed to stage uploaded file")?;

    // Extraction parses the whole document; keep it off the async runtime.
    let text = tokio::task::spawn_blocking(move || {
        let result = extract_text(temp.path(), format);
        drop(temp);
        result
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::Error::new(e)))??;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text extracted from the file".to_string(),
        ));
    }

    Ok(text)
}
