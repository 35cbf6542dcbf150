// Saved resumes per user. Identity is always an explicit `UserId` argument.

pub mod handlers;
pub mod models;
pub mod redis_store;
pub mod store;

pub use models::{SavedDocument, UserId};
pub use redis_store::RedisDocumentStore;
pub use store::{DocumentStore, MemoryDocumentStore};
