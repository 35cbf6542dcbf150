use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Opaque identifier of the user who owns a set of saved documents.
///
/// Passed explicitly into every store operation. Nothing here interprets it beyond
/// requiring it to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("user_id is required".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resume saved under a user-chosen name. `content` is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDocument {
    pub name: String,
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

/// Listing entry. The content is only returned when a single document is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub size_bytes: usize,
}

impl From<&SavedDocument> for DocumentSummary {
    fn from(doc: &SavedDocument) -> Self {
        Self {
            name: doc.name.clone(),
            saved_at: doc.saved_at,
            size_bytes: doc.content.len(),
        }
    }
}

/// Trims a user-supplied document name and checks it can be addressed by path.
pub fn normalize_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Document name cannot be empty".to_string()));
    }
    if name.contains('/') {
        return Err(AppError::Validation(
            "Document name cannot contain '/'".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Oldest first; documents saved in the same instant are ordered by name.
pub fn sort_documents(documents: &mut [SavedDocument]) {
    documents.sort_by(|a, b| a.saved_at.cmp(&b.saved_at).then_with(|| a.name.cmp(&b.name)));
}
