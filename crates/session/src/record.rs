//! Session Record
//!
//! The stored representation of one visitor's session: an id, a JSON data
//! map, and the internally managed CSRF secret. Created lazily on first
//! touch and discarded after the idle lifetime.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Length of the per-session anti-forgery secret
pub const CSRF_SECRET_LEN: usize = 32;

/// One visitor's session state
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Session ID (UUID v4); the signed cookie token references it
    pub id: Uuid,
    /// String-keyed session data
    pub data: HashMap<String, Value>,
    /// Anti-forgery secret, regenerated on every rotation
    pub csrf_secret: Vec<u8>,
    /// Expiry (Unix timestamp ms); slides forward on every save
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a fresh record with a random id and CSRF secret
    pub fn new(idle_ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            data: HashMap::new(),
            csrf_secret: platform::crypto::random_bytes(CSRF_SECRET_LEN),
            expires_at_ms: now.timestamp_millis() + idle_ttl.as_millis() as i64,
            created_at: now,
        }
    }

    /// Check if the idle lifetime has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Slide the expiry forward by the idle lifetime
    pub fn touch(&mut self, idle_ttl: Duration) {
        self.expires_at_ms = Utc::now().timestamp_millis() + idle_ttl.as_millis() as i64;
    }

    /// Replace id and CSRF secret; the old id must be deleted by the caller
    pub fn rotate(&mut self) {
        self.id = Uuid::new_v4();
        self.csrf_secret = platform::crypto::random_bytes(CSRF_SECRET_LEN);
    }
}
