use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::{DateRange, PromptStore, StoreError};
use crate::models::prompt::{NewPrompt, PromptRecord};

/// Direct PostgreSQL backend, used when a `DATABASE_URL` is configured.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Raw row: enum columns are free text in the table.
#[derive(Debug, FromRow)]
struct PromptRow {
    id: Uuid,
    text: String,
    platform: Option<String>,
    content_date: Option<NaiveDate>,
    layout_type: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<PromptRow> for PromptRecord {
    fn from(row: PromptRow) -> Self {
        PromptRecord {
            id: row.id,
            text: row.text,
            platform: row.platform.and_then(|p| p.parse().ok()),
            content_date: row.content_date,
            layout_type: row.layout_type.and_then(|l| l.parse().ok()),
            created_at: row.created_at,
        }
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        info!("Prompt table migrations applied");
        Ok(())
    }
}

#[async_trait]
impl PromptStore for PgStore {
    async fn insert(&self, prompt: NewPrompt) -> Result<PromptRecord, StoreError> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            INSERT INTO prompts (text, platform, content_date, layout_type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text, platform, content_date, layout_type, created_at
            "#,
        )
        .bind(&prompt.text)
        .bind(prompt.platform.map(|p| p.as_str()))
        .bind(prompt.content_date)
        .bind(prompt.layout_type.map(|l| l.as_str()))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self, range: Option<DateRange>) -> Result<Vec<PromptRecord>, StoreError> {
        let rows = match range {
            None => {
                sqlx::query_as::<_, PromptRow>(
                    "SELECT id, text, platform, content_date, layout_type, created_at \
                     FROM prompts ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
            Some(range) => {
                sqlx::query_as::<_, PromptRow>(
                    "SELECT id, text, platform, content_date, layout_type, created_at \
                     FROM prompts \
                     WHERE content_date >= $1 AND content_date <= $2 \
                     ORDER BY created_at DESC",
                )
                .bind(range.from)
                .bind(range.to)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(PromptRecord::from).collect())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prompt::{LayoutType, Platform};

    #[test]
    fn test_row_conversion_parses_enum_columns() {
        let row = PromptRow {
            id: Uuid::new_v4(),
            text: "yt timeline".to_string(),
            platform: Some("YouTube".to_string()),
            content_date: None,
            layout_type: Some("timeline".to_string()),
            created_at: Utc::now(),
        };
        let record = PromptRecord::from(row);
        assert_eq!(record.platform, Some(Platform::YouTube));
        assert_eq!(record.layout_type, Some(LayoutType::Timeline));
    }

    #[test]
    fn test_row_conversion_drops_unknown_values() {
        let row = PromptRow {
            id: Uuid::new_v4(),
            text: "legacy".to_string(),
            platform: Some("Myspace".to_string()),
            content_date: None,
            layout_type: Some("masonry".to_string()),
            created_at: Utc::now(),
        };
        let record = PromptRecord::from(row);
        assert_eq!(record.platform, None);
        assert_eq!(record.layout_type, None);
    }
}
