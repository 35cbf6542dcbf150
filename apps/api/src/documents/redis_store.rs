//! Redis-backed document store.
//!
//! Layout: one hash per user at `saved_documents:{user_id}`; field = document name,
//! value = the JSON-encoded `SavedDocument`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::documents::models::{sort_documents, SavedDocument, UserId};
use crate::documents::store::DocumentStore;
use crate::errors::AppError;

const KEY_PREFIX: &str = "saved_documents";

#[derive(Clone)]
pub struct RedisDocumentStore {
    conn: MultiplexedConnection,
}

impl RedisDocumentStore {
    /// Opens a multiplexed connection. Fails fast if Redis is unreachable.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Invalid REDIS_URL")?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;
        info!("Redis document store connected");
        Ok(Self { conn })
    }
}

pub fn user_key(user: &UserId) -> String {
    format!("{KEY_PREFIX}:{user}")
}

fn encode(document: &SavedDocument) -> Result<String, AppError> {
    serde_json::to_string(document)
        .context("Failed to encode saved document")
        .map_err(AppError::Internal)
}

fn decode(raw: &str) -> Result<SavedDocument, AppError> {
    serde_json::from_str(raw)
        .context("Corrupt saved document in Redis")
        .map_err(AppError::Internal)
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn list(&self, user: &UserId) -> Result<Vec<SavedDocument>, AppError> {
        let mut conn = self.conn.clone();
        let values: Vec<String> = conn.hvals(user_key(user)).await?;
        let mut documents = values
            .iter()
            .map(|raw| decode(raw))
            .collect::<Result<Vec<_>, _>>()?;
        sort_documents(&mut documents);
        Ok(documents)
    }

    async fn get(&self, user: &UserId, name: &str) -> Result<Option<SavedDocument>, AppError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.hget(user_key(user), name).await?;
        value.as_deref().map(decode).transpose()
    }

    async fn put(&self, user: &UserId, document: SavedDocument) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        let encoded = encode(&document)?;
        let _: () = conn.hset(user_key(user), &document.name, encoded).await?;
        Ok(())
    }

    async fn put_if_absent(
        &self,
        user: &UserId,
        document: SavedDocument,
    ) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let encoded = encode(&document)?;
        // HSETNX is atomic: exactly one writer claims a given name.
        let inserted: bool = conn
            .hset_nx(user_key(user), &document.name, encoded)
            .await?;
        Ok(inserted)
    }

    async fn delete(&self, user: &UserId, name: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.hdel(user_key(user), name).await?;
        Ok(removed > 0)
    }
}
