use std::sync::Arc;

use crate::client::PromptStoreClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the store seam and the displayed list. Built once in `main` from
    /// config, or around a `MemoryStore` in tests.
    pub prompts: Arc<PromptStoreClient>,
    pub config: Config,
}
