//! PostgreSQL Snippet Store

use chrono::{DateTime, Duration, Utc};
use kernel::id::SnippetId;
use sqlx::PgPool;

use crate::domain::entities::Snippet;
use crate::domain::repository::SnippetStore;
use crate::error::{SnippetError, SnippetResult};

/// PostgreSQL-backed snippet store
#[derive(Clone)]
pub struct PgSnippetStore {
    pool: PgPool,
}

impl PgSnippetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SnippetStore for PgSnippetStore {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i64,
    ) -> SnippetResult<SnippetId> {
        let now = Utc::now();
        let expires_at = now + Duration::days(expires_days);

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO snippets (title, content, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(snippet_id = id, "Snippet created");
        Ok(SnippetId::from_i64(id))
    }

    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet> {
        let row = sqlx::query_as::<_, SnippetRow>(
            r#"
            SELECT id, title, content, created_at, expires_at
            FROM snippets
            WHERE id = $1 AND expires_at > now()
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(SnippetRow::into_snippet).ok_or(SnippetError::NoRecord)
    }

    async fn latest(&self) -> SnippetResult<Vec<Snippet>> {
        let rows = sqlx::query_as::<_, SnippetRow>(
            r#"
            SELECT id, title, content, created_at, expires_at
            FROM snippets
            WHERE expires_at > now()
            ORDER BY created_at DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SnippetRow::into_snippet).collect())
    }
}

// ============================================================================
// Row type for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SnippetRow {
    fn into_snippet(self) -> Snippet {
        Snippet {
            id: SnippetId::from_i64(self.id),
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
