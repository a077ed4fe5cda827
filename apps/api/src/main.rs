mod client;
mod config;
mod db;
mod errors;
mod interpreter;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::client::{PromptStoreClient, TimeFilter};
use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, PostgrestStore, PromptStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Nebula API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;
    info!("Prompt store initialized (backend: {})", store.backend());

    let prompts = PromptStoreClient::new(store, config.token_matching);
    info!("Prompt interpreter using {:?} token matching", config.token_matching);

    // Warm the displayed list; a failure here is logged and the list starts empty.
    if prompts.fetch_window(TimeFilter::All).await.is_ok() {
        info!("Loaded {} stored prompt(s)", prompts.displayed().len());
    }

    let state = AppState {
        prompts: Arc::new(prompts),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured `PromptStore` backend.
async fn build_store(config: &Config) -> Result<Arc<dyn PromptStore>> {
    let store: Arc<dyn PromptStore> = match config.store_backend {
        StoreBackend::Postgrest => Arc::new(PostgrestStore::new(
            &config.supabase_url,
            config.supabase_anon_key.clone(),
        )?) as Arc<dyn PromptStore>,
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres store"))?;
            let store = PgStore::new(create_pool(url).await?);
            if config.run_migrations {
                store.migrate().await?;
            }
            Arc::new(store)
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}
