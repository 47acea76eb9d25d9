//! Session Repositories
//!
//! The storage contract behind the manager. Two implementations ship: a
//! Postgres backend and a deterministic in-memory backend for tests and
//! single-process development. A distributed backend can be swapped in by
//! implementing the same trait.

use uuid::Uuid;

use crate::error::SessionResult;
use crate::record::SessionRecord;

pub mod memory;
pub mod postgres;

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Find a live (unexpired) session by id
    async fn find(&self, session_id: Uuid) -> SessionResult<Option<SessionRecord>>;

    /// Persist a session record (atomic upsert)
    async fn save(&self, record: &SessionRecord) -> SessionResult<()>;

    /// Delete a session record
    async fn delete(&self, session_id: Uuid) -> SessionResult<()>;

    /// Remove expired records, returning how many were deleted
    async fn cleanup_expired(&self) -> SessionResult<u64>;
}
