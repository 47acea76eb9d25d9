//! Snippet Store Contract

use kernel::id::SnippetId;

use crate::domain::entities::Snippet;
use crate::error::SnippetResult;

/// Snippet store trait
#[trait_variant::make(SnippetStore: Send)]
pub trait LocalSnippetStore {
    /// Create a snippet expiring `expires_days` from now
    async fn insert(&self, title: &str, content: &str, expires_days: i64)
    -> SnippetResult<SnippetId>;

    /// Fetch a live snippet;
    /// [`SnippetError::NoRecord`](crate::error::SnippetError::NoRecord) when
    /// absent or expired
    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet>;

    /// The ten most recently created live snippets
    async fn latest(&self) -> SnippetResult<Vec<Snippet>>;
}
