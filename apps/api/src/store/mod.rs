//! Prompt Store — the persistence seam.
//!
//! `AppState` carries an `Arc<dyn PromptStore>`; the backend is picked at startup
//! from config. All backends return records newest-first by `created_at`.

pub mod memory;
pub mod postgres;
pub mod postgrest;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::prompt::{NewPrompt, PromptRecord};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use postgrest::PostgrestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store returned no row for insert")]
    EmptyInsert,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Inclusive `content_date` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Inserts one row; the store assigns `id` and `created_at`.
    async fn insert(&self, prompt: NewPrompt) -> Result<PromptRecord, StoreError>;

    /// Lists rows with `content_date` inside `range` (all rows when `None`),
    /// ordered by `created_at` descending. Rows without a `content_date`
    /// only appear when no range applies.
    async fn list(&self, range: Option<DateRange>) -> Result<Vec<PromptRecord>, StoreError>;

    /// Backend name, for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
