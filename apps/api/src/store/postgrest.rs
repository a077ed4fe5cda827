//! Hosted-database backend speaking the PostgREST dialect (`/rest/v1/<table>`).
//!
//! Authenticates with the project's public client key, sent both as `apikey`
//! and as a bearer token. No retries: every call is a single all-or-nothing request.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{DateRange, PromptStore, StoreError};
use crate::models::prompt::{NewPrompt, PromptRecord};

const TABLE: &str = "prompts";

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// Query string for a list call: newest first, optionally bounded on `content_date`.
pub(crate) fn list_query(range: Option<DateRange>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ];
    if let Some(range) = range {
        query.push(("content_date", format!("gte.{}", range.from.format("%Y-%m-%d"))));
        query.push(("content_date", format!("lte.{}", range.to.format("%Y-%m-%d"))));
    }
    query
}

async fn error_from(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    StoreError::Api { status, message }
}

#[async_trait]
impl PromptStore for PostgrestStore {
    async fn insert(&self, prompt: NewPrompt) -> Result<PromptRecord, StoreError> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&prompt)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let mut rows: Vec<PromptRecord> = response.json().await?;
        debug!("Inserted {} prompt row(s)", rows.len());
        rows.pop().ok_or(StoreError::EmptyInsert)
    }

    async fn list(&self, range: Option<DateRange>) -> Result<Vec<PromptRecord>, StoreError> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&list_query(range))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let rows: Vec<PromptRecord> = response.json().await?;
        debug!("Fetched {} prompt row(s)", rows.len());
        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "postgrest"
    }
}
