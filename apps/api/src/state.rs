use std::sync::Arc;

use crate::config::Config;
use crate::documents::store::DocumentStore;
use crate::matching::comparator::Comparator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable after startup; built from the configured stop words and length threshold.
    pub comparator: Arc<Comparator>,
    /// Pluggable saved-document backend. Redis when `REDIS_URL` is set, in-memory otherwise.
    pub documents: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: Config, documents: Arc<dyn DocumentStore>) -> Self {
        let comparator = Arc::new(Comparator::new(config.tokenizer_config()));
        Self {
            config,
            comparator,
            documents,
        }
    }
}
