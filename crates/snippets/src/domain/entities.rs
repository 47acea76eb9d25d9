//! Snippet Entity

use chrono::{DateTime, Utc};
use kernel::id::SnippetId;

/// A shared text snippet
#[derive(Debug, Clone)]
pub struct Snippet {
    /// Immutable, assigned by the store
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Snippets stop being served once expired
    pub expires_at: DateTime<Utc>,
}

/// Permitted lifetimes for new snippets, in days
pub const EXPIRY_OPTIONS_DAYS: [i64; 3] = [1, 7, 365];

/// Maximum title length
pub const TITLE_MAX_LENGTH: usize = 100;
