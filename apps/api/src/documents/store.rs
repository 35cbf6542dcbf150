//! Saved-document storage behind a pluggable trait, keyed by (user, name).
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`: Redis when `REDIS_URL` is set,
//! otherwise the in-process `MemoryDocumentStore`.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::documents::models::{normalize_name, sort_documents, SavedDocument, UserId};
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents for `user`, oldest first.
    async fn list(&self, user: &UserId) -> Result<Vec<SavedDocument>, AppError>;

    async fn get(&self, user: &UserId, name: &str) -> Result<Option<SavedDocument>, AppError>;

    /// Inserts or replaces the document with the same name.
    async fn put(&self, user: &UserId, document: SavedDocument) -> Result<(), AppError>;

    /// Inserts only if the name is free. Returns false, storing nothing, when it is taken.
    async fn put_if_absent(&self, user: &UserId, document: SavedDocument)
        -> Result<bool, AppError>;

    /// Returns false when nothing was stored under `name`.
    async fn delete(&self, user: &UserId, name: &str) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Save flow shared by all backends
// ────────────────────────────────────────────────────────────────────────────

/// Saves `content` for `user`.
///
/// A blank or missing name falls back to `Resume N`, where N starts at the number of
/// documents already saved plus one and increases until the name is free.
pub async fn save_document(
    store: &dyn DocumentStore,
    user: &UserId,
    name: Option<&str>,
    content: String,
) -> Result<SavedDocument, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "There's no resume content to save.".to_string(),
        ));
    }

    let document = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let document = SavedDocument {
                name: normalize_name(name)?,
                content,
                saved_at: Utc::now(),
            };
            store.put(user, document.clone()).await?;
            document
        }
        None => save_with_default_name(store, user, content).await?,
    };

    info!(user = %user, name = %document.name, bytes = document.content.len(), "Saved document");
    Ok(document)
}

/// Claims the first free `Resume N` with `put_if_absent`, so concurrent saves never
/// land on the same name.
async fn save_with_default_name(
    store: &dyn DocumentStore,
    user: &UserId,
    content: String,
) -> Result<SavedDocument, AppError> {
    let existing = store.list(user).await?;
    let mut n = existing.len() + 1;
    loop {
        let name = default_name(n);
        if !existing.iter().any(|d| d.name == name) {
            let document = SavedDocument {
                name,
                content: content.clone(),
                saved_at: Utc::now(),
            };
            if store.put_if_absent(user, document.clone()).await? {
                return Ok(document);
            }
        }
        n += 1;
    }
}

fn default_name(n: usize) -> String {
    format!("Resume {n}")
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryDocumentStore
// ────────────────────────────────────────────────────────────────────────────

/// In-process store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<UserId, BTreeMap<String, SavedDocument>>>,
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, user: &UserId) -> Result<Vec<SavedDocument>, AppError> {
        let documents = self.documents.read().await;
        let mut list: Vec<SavedDocument> = documents
            .get(user)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default();
        sort_documents(&mut list);
        Ok(list)
    }

    async fn get(&self, user: &UserId, name: &str) -> Result<Option<SavedDocument>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents.get(user).and_then(|docs| docs.get(name)).cloned())
    }

    async fn put(&self, user: &UserId, document: SavedDocument) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        documents
            .entry(user.clone())
            .or_default()
            .insert(document.name.clone(), document);
        Ok(())
    }

    async fn put_if_absent(
        &self,
        user: &UserId,
        document: SavedDocument,
    ) -> Result<bool, AppError> {
        let mut documents = self.documents.write().await;
        let docs = documents.entry(user.clone()).or_default();
        if docs.contains_key(&document.name) {
            return Ok(false);
        }
        docs.insert(document.name.clone(), document);
        Ok(true)
    }

    async fn delete(&self, user: &UserId, name: &str) -> Result<bool, AppError> {
        let mut documents = self.documents.write().await;
        let Some(docs) = documents.get_mut(user) else {
            return Ok(false);
        };
        let removed = docs.remove(name).is_some();
        if docs.is_empty() {
            documents.remove(user);
        }
        Ok(removed)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
