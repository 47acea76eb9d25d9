//! In-Memory Session Repository
//!
//! Single-process backend with the same contract as the Postgres store.
//! Used by the test suite and available for development without a database.
//! The RwLock serialises writes, so concurrent saves of one record never
//! interleave.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SessionResult;
use crate::record::SessionRecord;
use crate::store::SessionRepository;

/// In-memory session repository
#[derive(Clone, Default)]
pub struct MemorySessionRepository {
    records: Arc<RwLock<HashMap<Uuid, SessionRecord>>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records (test helper)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn find(&self, session_id: Uuid) -> SessionResult<Option<SessionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(&session_id)
            .filter(|record| !record.is_expired())
            .cloned())
    }

    async fn save(&self, record: &SessionRecord) -> SessionResult<()> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> SessionResult<()> {
        let mut records = self.records.write().await;
        records.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> SessionResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_save_find_delete() {
        let repo = MemorySessionRepository::new();
        let record = SessionRecord::new(Duration::from_secs(60));

        repo.save(&record).await.unwrap();
        let found = repo.find(record.id).await.unwrap().unwrap();
        assert_eq!(found.id, record.id);

        repo.delete(record.id).await.unwrap();
        assert!(repo.find(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_filters_expired() {
        let repo = MemorySessionRepository::new();
        let mut record = SessionRecord::new(Duration::from_secs(60));
        record.expires_at_ms = 0;

        repo.save(&record).await.unwrap();
        assert!(repo.find(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = MemorySessionRepository::new();

        let live = SessionRecord::new(Duration::from_secs(60));
        let mut dead = SessionRecord::new(Duration::from_secs(60));
        dead.expires_at_ms = 0;

        repo.save(&live).await.unwrap();
        repo.save(&dead).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find(live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_is_upsert() {
        let repo = MemorySessionRepository::new();
        let mut record = SessionRecord::new(Duration::from_secs(60));

        repo.save(&record).await.unwrap();
        record
            .data
            .insert("k".to_string(), serde_json::Value::from("v"));
        repo.save(&record).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let found = repo.find(record.id).await.unwrap().unwrap();
        assert_eq!(found.data.get("k").and_then(|v| v.as_str()), Some("v"));
    }
}
