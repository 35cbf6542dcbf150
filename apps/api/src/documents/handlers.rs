use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::documents::models::{normalize_name, DocumentSummary, SavedDocument, UserId};
use crate::documents::store::save_document;
use crate::errors::{AppError, AppJson};
use crate::matching::comparator::MatchResult;
use crate::matching::handlers::{require_both, run_match};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct SaveDocumentRequest {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub content: String,
}

#[derive(Deserialize)]
pub struct MatchSavedRequest {
    pub job_text: String,
}

#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

/// GET /api/v1/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let user = UserId::parse(&params.user_id)?;
    let documents = state.documents.list(&user).await?;
    Ok(Json(DocumentListResponse {
        documents: documents.iter().map(DocumentSummary::from).collect(),
    }))
}

/// POST /api/v1/documents
pub async fn handle_save_document(
    State(state): State<AppState>,
    AppJson(req): AppJson<SaveDocumentRequest>,
) -> Result<(StatusCode, Json<SavedDocument>), AppError> {
    let user = UserId::parse(&req.user_id)?;
    let document =
        save_document(state.documents.as_ref(), &user, req.name.as_deref(), req.content).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents/:name
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<SavedDocument>, AppError> {
    let user = UserId::parse(&params.user_id)?;
    Ok(Json(load(&state, &user, &name).await?))
}

/// DELETE /api/v1/documents/:name
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let user = UserId::parse(&params.user_id)?;
    let name = normalize_name(&name)?;
    if !state.documents.delete(&user, &name).await? {
        return Err(not_found(&name));
    }
    tracing::info!(user = %user, name = %name, "Deleted document");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:name/match
///
/// Compares a saved resume against a pasted job description.
pub async fn handle_match_saved(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<UserIdQuery>,
    AppJson(req): AppJson<MatchSavedRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let user = UserId::parse(&params.user_id)?;
    let document = load(&state, &user, &name).await?;
    let (resume_text, job_text) = require_both(&document.content, &req.job_text)?;
    Ok(Json(run_match(&state, resume_text, job_text)))
}

/// Path segments go through the same normalization as names on save.
async fn load(state: &AppState, user: &UserId, raw_name: &str) -> Result<SavedDocument, AppError> {
    let name = normalize_name(raw_name)?;
    state
        .documents
        .get(user, &name)
        .await?
        .ok_or_else(|| not_found(&name))
}

fn not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Saved document '{name}' not found"))
}
