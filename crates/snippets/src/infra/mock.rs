//! Deterministic Snippet Store Double
//!
//! Fixture semantics: snippet `1` exists (a haiku), every other id is
//! absent, inserts report id `2`.

use chrono::{Duration, TimeZone, Utc};
use kernel::id::SnippetId;

use crate::domain::entities::Snippet;
use crate::domain::repository::SnippetStore;
use crate::error::{SnippetError, SnippetResult};

const EXISTING_ID: i64 = 1;

/// Deterministic in-memory snippet store
#[derive(Clone, Copy, Default)]
pub struct MockSnippetStore;

impl MockSnippetStore {
    pub fn new() -> Self {
        Self
    }

    fn existing_snippet() -> Snippet {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Snippet {
            id: SnippetId::from_i64(EXISTING_ID),
            title: "An old silent pond".to_string(),
            content: "An old silent pond...\nA frog jumps into the pond,\nsplash! Silence again."
                .to_string(),
            created_at,
            expires_at: created_at + Duration::days(365 * 100),
        }
    }
}

impl SnippetStore for MockSnippetStore {
    async fn insert(
        &self,
        _title: &str,
        _content: &str,
        _expires_days: i64,
    ) -> SnippetResult<SnippetId> {
        Ok(SnippetId::from_i64(2))
    }

    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet> {
        if id.as_i64() == EXISTING_ID {
            Ok(Self::existing_snippet())
        } else {
            Err(SnippetError::NoRecord)
        }
    }

    async fn latest(&self) -> SnippetResult<Vec<Snippet>> {
        Ok(vec![Self::existing_snippet()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_semantics() {
        let store = MockSnippetStore::new();

        let snippet = store.get(SnippetId::from_i64(1)).await.unwrap();
        assert!(snippet.content.starts_with("An old silent pond..."));

        let err = store.get(SnippetId::from_i64(2)).await.unwrap_err();
        assert!(matches!(err, SnippetError::NoRecord));

        let id = store.insert("t", "c", 7).await.unwrap();
        assert_eq!(id.as_i64(), 2);

        assert_eq!(store.latest().await.unwrap().len(), 1);
    }
}
