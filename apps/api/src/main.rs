use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resumatch_api::config::Config;
use resumatch_api::documents::{DocumentStore, MemoryDocumentStore, RedisDocumentStore};
use resumatch_api::routes::build_router;
use resumatch_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; bails on values that do not parse
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize saved-document store
    let documents: Arc<dyn DocumentStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisDocumentStore::connect(url).await?),
        None => {
            warn!("REDIS_URL not set; saved documents are kept in memory and lost on restart");
            Arc::new(MemoryDocumentStore::default())
        }
    };

    // Build app state (comparator is built from the configured tokenizer settings)
    let state = AppState::new(config.clone(), documents);
    info!(
        stop_words = state.comparator.tokenizer().stop_word_count(),
        min_token_len = state.comparator.tokenizer().min_token_len(),
        "Comparator configured"
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
