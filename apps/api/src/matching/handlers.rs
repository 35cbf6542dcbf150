//! Axum route handlers for the Match API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{AppError, AppJson};
use crate::matching::comparator::MatchResult;
use crate::matching::extract::extract_resume_text;
use crate::state::AppState;

pub const MISSING_INPUT_MESSAGE: &str = "Please paste both your resume and the job description.";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores a pasted resume against a pasted job description.
pub async fn handle_match(
    State(state): State<AppState>,
    AppJson(request): AppJson<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let (resume_text, job_text) = require_both(&request.resume_text, &request.job_text)?;
    Ok(Json(run_match(&state, resume_text, job_text)))
}

/// POST /api/v1/match/upload
///
/// Multipart variant: `resume` is a file part (PDF or plain text), `job_text` a text part.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResult>, AppError> {
    let mut resume: Option<(Option<String>, Bytes)> = None;
    let mut job_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await.map_err(malformed)?;
                resume = Some((content_type, data));
            }
            Some("job_text") => {
                job_text = Some(field.text().await.map_err(malformed)?);
            }
            other => debug!(field = ?other, "Ignoring unknown multipart field"),
        }
    }

    let (content_type, data) = resume.ok_or_else(missing_input)?;
    let job_text = job_text.ok_or_else(missing_input)?;

    let size = data.len();
    let resume_text =
        tokio::task::spawn_blocking(move || extract_resume_text(content_type.as_deref(), &data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume extraction task failed: {e}")))??;
    info!(bytes = size, "Resume upload extracted");

    let (resume_text, job_text) = require_both(&resume_text, &job_text)?;
    Ok(Json(run_match(&state, resume_text, job_text)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trims both inputs and rejects the request if either is blank.
pub fn require_both<'a>(
    resume_text: &'a str,
    job_text: &'a str,
) -> Result<(&'a str, &'a str), AppError> {
    let resume_text = resume_text.trim();
    let job_text = job_text.trim();
    if resume_text.is_empty() || job_text.is_empty() {
        return Err(missing_input());
    }
    Ok((resume_text, job_text))
}

pub(crate) fn run_match(state: &AppState, resume_text: &str, job_text: &str) -> MatchResult {
    let result = state.comparator.compare(resume_text, job_text);
    debug!(
        match_score = result.match_score,
        missing = result.missing_keywords.len(),
        "Compared resume against job description"
    );
    result
}

fn missing_input() -> AppError {
    AppError::Validation(MISSING_INPUT_MESSAGE.to_string())
}

fn malformed(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}
