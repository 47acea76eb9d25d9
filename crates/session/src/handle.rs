//! Session Handle
//!
//! [`Session`] is the per-request view of a session record. It is cheaply
//! cloneable and lives in the request extensions; the handler and every
//! pipeline stage observe the same state. All mutation happens in memory
//! and is persisted once, when the middleware saves the session after the
//! handler runs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::record::SessionRecord;

/// Key for the one-shot notification message
pub const FLASH_KEY: &str = "flash";

/// Key for the one-shot post-login redirect target
pub const PREVIOUS_URL_KEY: &str = "previousUrl";

#[derive(Debug)]
struct Inner {
    record: SessionRecord,
    /// Never persisted yet; nothing to delete on rotation
    fresh: bool,
    /// Read or written this request; persist and refresh the cookie
    touched: bool,
    /// Previous id to delete after a rotation
    stale_id: Option<Uuid>,
    destroyed: bool,
}

/// Per-request session handle
#[derive(Clone, Debug)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
}

impl Session {
    /// Wrap a record loaded from the store
    pub(crate) fn from_record(record: SessionRecord) -> Self {
        Self::build(record, false)
    }

    /// Start a brand-new anonymous session (persisted only if touched)
    pub(crate) fn start(idle_ttl: Duration) -> Self {
        Self::build(SessionRecord::new(idle_ttl), true)
    }

    fn build(record: SessionRecord, fresh: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                record,
                fresh,
                touched: false,
                stale_id: None,
                destroyed: false,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("session lock poisoned")
    }

    /// Current session id (changes on rotation)
    pub fn id(&self) -> Uuid {
        self.lock().record.id
    }

    // ========================================================================
    // Data access
    // ========================================================================

    pub fn get_string(&self, key: &str) -> Option<String> {
        let inner = self.lock();
        inner
            .record
            .data
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.lock().record.data.get(key).and_then(Value::as_i64)
    }

    pub fn put(&self, key: &str, value: impl Into<Value>) {
        let mut inner = self.lock();
        inner.record.data.insert(key.to_owned(), value.into());
        inner.touched = true;
    }

    pub fn remove(&self, key: &str) {
        let mut inner = self.lock();
        if inner.record.data.remove(key).is_some() {
            inner.touched = true;
        }
    }

    /// Read-and-clear a string value: at-most-once delivery.
    ///
    /// Used for flash messages and the post-login redirect target.
    pub fn pop_string(&self, key: &str) -> Option<String> {
        let mut inner = self.lock();
        let value = inner.record.data.remove(key)?;
        inner.touched = true;
        value.as_str().map(str::to_owned)
    }

    // ========================================================================
    // CSRF
    // ========================================================================

    /// The anti-forgery token bound to this session, for embedding in forms.
    ///
    /// Reading it counts as a touch: the secret must be persisted or the
    /// form round-trip could never verify.
    pub fn csrf_token(&self) -> String {
        let mut inner = self.lock();
        inner.touched = true;
        platform::crypto::to_base64url(&inner.record.csrf_secret)
    }

    /// Constant-time check of a submitted token. Fails closed: malformed or
    /// wrongly sized tokens are simply unequal.
    pub fn verify_csrf(&self, candidate: &str) -> bool {
        let decoded = match platform::crypto::from_base64url(candidate) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let inner = self.lock();
        platform::crypto::constant_time_eq(&decoded, &inner.record.csrf_secret)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Rotate the token: new id, new CSRF secret, old record deleted at save
    /// time. Performed on login and logout to prevent session fixation.
    pub fn renew_token(&self) {
        let mut inner = self.lock();
        if !inner.fresh && inner.stale_id.is_none() {
            inner.stale_id = Some(inner.record.id);
        }
        inner.record.rotate();
        inner.touched = true;
    }

    /// Terminate the session: the record is deleted and the cookie expired
    pub fn destroy(&self) {
        let mut inner = self.lock();
        inner.destroyed = true;
    }

    /// Snapshot for the manager's save pass
    pub(crate) fn state(&self) -> SessionState {
        let inner = self.lock();
        SessionState {
            record: inner.record.clone(),
            fresh: inner.fresh,
            touched: inner.touched,
            stale_id: inner.stale_id,
            destroyed: inner.destroyed,
        }
    }
}

/// Consistent snapshot of a session at save time
pub(crate) struct SessionState {
    pub record: SessionRecord,
    pub fresh: bool,
    pub touched: bool,
    pub stale_id: Option<Uuid>,
    pub destroyed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::start(Duration::from_secs(60))
    }

    #[test]
    fn test_put_get_remove() {
        let session = session();
        assert_eq!(session.get_string("flash"), None);

        session.put("flash", "saved!");
        assert_eq!(session.get_string("flash"), Some("saved!".to_string()));

        session.put("authenticatedUserID", 7i64);
        assert_eq!(session.get_i64("authenticatedUserID"), Some(7));
        // Wrong-typed reads are None, not panics
        assert_eq!(session.get_string("authenticatedUserID"), None);

        session.remove("flash");
        assert_eq!(session.get_string("flash"), None);
    }

    #[test]
    fn test_pop_string_is_one_shot() {
        let session = session();
        session.put(FLASH_KEY, "only once");

        assert_eq!(session.pop_string(FLASH_KEY), Some("only once".to_string()));
        assert_eq!(session.pop_string(FLASH_KEY), None);
        assert_eq!(session.get_string(FLASH_KEY), None);
    }

    #[test]
    fn test_untouched_until_used() {
        let session = session();
        assert!(!session.state().touched);

        session.put("k", "v");
        assert!(session.state().touched);
    }

    #[test]
    fn test_csrf_token_roundtrip() {
        let session = session();
        let token = session.csrf_token();

        assert!(session.verify_csrf(&token));
        assert!(!session.verify_csrf("wrongToken"));
        assert!(!session.verify_csrf(""));
        assert!(!session.verify_csrf("!!not base64!!"));
        // reading the token marks the session for persistence
        assert!(session.state().touched);
    }

    #[test]
    fn test_renew_rotates_id_and_csrf_keeps_data() {
        let session = session();
        session.put("k", "v");
        let old_id = session.id();
        let old_token = session.csrf_token();

        session.renew_token();

        assert_ne!(session.id(), old_id);
        assert!(!session.verify_csrf(&old_token));
        assert!(session.verify_csrf(&session.csrf_token()));
        assert_eq!(session.get_string("k"), Some("v".to_string()));
        // fresh session: no stored record to delete
        assert_eq!(session.state().stale_id, None);
    }

    #[test]
    fn test_renew_of_loaded_session_remembers_stale_id() {
        let record = SessionRecord::new(Duration::from_secs(60));
        let original_id = record.id;
        let session = Session::from_record(record);

        session.renew_token();
        session.renew_token();

        // the first persisted id is the one to delete, even after two renewals
        assert_eq!(session.state().stale_id, Some(original_id));
    }

    #[test]
    fn test_destroy() {
        let session = session();
        session.put("k", "v");
        session.destroy();
        assert!(session.state().destroyed);
    }
}
