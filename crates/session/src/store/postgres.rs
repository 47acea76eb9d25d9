//! PostgreSQL Session Repository

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::SessionResult;
use crate::record::SessionRecord;
use crate::store::SessionRepository;

/// PostgreSQL-backed session repository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for PgSessionRepository {
    async fn find(&self, session_id: Uuid) -> SessionResult<Option<SessionRecord>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                data,
                csrf_secret,
                expires_at_ms,
                created_at
            FROM sessions
            WHERE id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn save(&self, record: &SessionRecord) -> SessionResult<()> {
        // Single-statement upsert: concurrent saves of the same session
        // cannot interleave partially.
        let data = serde_json::to_value(&record.data)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, data, csrf_secret, expires_at_ms, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                data = EXCLUDED.data,
                csrf_secret = EXCLUDED.csrf_secret,
                expires_at_ms = EXCLUDED.expires_at_ms
            "#,
        )
        .bind(record.id)
        .bind(data)
        .bind(&record.csrf_secret)
        .bind(record.expires_at_ms)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> SessionResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> SessionResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row type for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    data: Value,
    csrf_secret: Vec<u8>,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_record(self) -> SessionResult<SessionRecord> {
        let data: HashMap<String, Value> = serde_json::from_value(self.data)?;

        Ok(SessionRecord {
            id: self.id,
            data,
            csrf_secret: self.csrf_secret,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        })
    }
}
