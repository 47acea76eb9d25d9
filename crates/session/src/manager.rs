//! Session Manager
//!
//! Orchestrates the session lifecycle for one request: verify the cookie
//! token and load the record (or start a fresh anonymous session), and after
//! the handler has run, persist whatever the request touched and produce the
//! Set-Cookie value.

use std::sync::Arc;
use std::time::Duration;

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::handle::Session;
use crate::store::SessionRepository;
use crate::token;

/// Session manager over a swappable repository
pub struct SessionManager<R> {
    repo: Arc<R>,
    config: Arc<SessionConfig>,
}

// Manual impl: `R` itself need not be Clone behind the Arc.
impl<R> Clone for SessionManager<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> SessionManager<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: SessionConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn idle_ttl(&self) -> Duration {
        self.config.idle_ttl
    }

    /// Load the session referenced by the request cookie.
    ///
    /// Absent, forged, unknown, and expired tokens all yield a fresh
    /// anonymous session; a store failure is logged and degrades to
    /// anonymous rather than failing the request.
    pub async fn load(&self, cookie_value: Option<&str>) -> Session {
        if let Some(token) = cookie_value {
            if let Some(session_id) = token::verify(&self.config.secret, token) {
                match self.repo.find(session_id).await {
                    Ok(Some(record)) => return Session::from_record(record),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to load session, starting fresh");
                    }
                }
            }
        }

        Session::start(self.idle_ttl())
    }

    /// Persist the session and produce a Set-Cookie value when the response
    /// must carry one.
    ///
    /// - destroyed: delete the record, expire the cookie
    /// - touched: slide the expiry, delete any rotated-away record, upsert,
    ///   emit a (refreshed) signed cookie
    /// - untouched: nothing is stored, no cookie is sent
    pub async fn save(&self, session: &Session) -> SessionResult<Option<String>> {
        let state = session.state();

        if state.destroyed {
            if !state.fresh {
                self.repo.delete(state.record.id).await?;
            }
            if let Some(stale_id) = state.stale_id {
                self.repo.delete(stale_id).await?;
            }
            return Ok(Some(self.config.cookie.build_delete_cookie()));
        }

        if !state.touched {
            return Ok(None);
        }

        if let Some(stale_id) = state.stale_id {
            self.repo.delete(stale_id).await?;
        }

        let mut record = state.record;
        record.touch(self.idle_ttl());
        self.repo.save(&record).await?;

        let token = token::sign(&self.config.secret, record.id);
        Ok(Some(self.config.cookie.build_set_cookie(&token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemorySessionRepository;

    fn manager() -> SessionManager<MemorySessionRepository> {
        SessionManager::new(MemorySessionRepository::new(), SessionConfig::development())
    }

    /// Pull the bare token out of a Set-Cookie value
    fn cookie_token(set_cookie: &str) -> String {
        let pair = set_cookie.split(';').next().unwrap();
        pair.split_once('=').unwrap().1.to_string()
    }

    #[tokio::test]
    async fn test_untouched_session_not_persisted() {
        let manager = manager();
        let session = manager.load(None).await;

        assert_eq!(manager.save(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_touched_session_roundtrip() {
        let manager = manager();

        let session = manager.load(None).await;
        session.put("flash", "hello");
        let set_cookie = manager.save(&session).await.unwrap().unwrap();
        let token = cookie_token(&set_cookie);

        let reloaded = manager.load(Some(&token)).await;
        assert_eq!(reloaded.get_string("flash"), Some("hello".to_string()));
        assert_eq!(reloaded.id(), session.id());
    }

    #[tokio::test]
    async fn test_garbage_cookie_yields_fresh_session() {
        let manager = manager();

        let session = manager.load(Some("garbage.token")).await;
        assert!(session.get_string("flash").is_none());
        // a fresh session is anonymous and unstored
        assert_eq!(manager.save(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_renew_invalidates_old_token() {
        let manager = manager();

        // establish a stored session
        let session = manager.load(None).await;
        session.put("authenticatedUserID", 1i64);
        let old_cookie = manager.save(&session).await.unwrap().unwrap();
        let old_token = cookie_token(&old_cookie);

        // rotate it
        let session = manager.load(Some(&old_token)).await;
        session.renew_token();
        let new_cookie = manager.save(&session).await.unwrap().unwrap();
        let new_token = cookie_token(&new_cookie);
        assert_ne!(old_token, new_token);

        // the old token is now a fresh anonymous session
        let stale = manager.load(Some(&old_token)).await;
        assert_eq!(stale.get_i64("authenticatedUserID"), None);

        // the new token still authenticates
        let current = manager.load(Some(&new_token)).await;
        assert_eq!(current.get_i64("authenticatedUserID"), Some(1));
    }

    #[tokio::test]
    async fn test_destroy_deletes_record_and_expires_cookie() {
        let repo = MemorySessionRepository::new();
        let manager = SessionManager::new(repo.clone(), SessionConfig::development());

        let session = manager.load(None).await;
        session.put("k", "v");
        let set_cookie = manager.save(&session).await.unwrap().unwrap();
        let token = cookie_token(&set_cookie);
        assert_eq!(repo.len().await, 1);

        let session = manager.load(Some(&token)).await;
        session.destroy();
        let set_cookie = manager.save(&session).await.unwrap().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_session_treated_as_absent() {
        let repo = MemorySessionRepository::new();
        let config = SessionConfig {
            idle_ttl: Duration::from_millis(0),
            ..SessionConfig::development()
        };
        let manager = SessionManager::new(repo, config);

        let session = manager.load(None).await;
        session.put("k", "v");
        let set_cookie = manager.save(&session).await.unwrap().unwrap();
        let token = cookie_token(&set_cookie);

        tokio::time::sleep(Duration::from_millis(5)).await;

        let reloaded = manager.load(Some(&token)).await;
        assert_eq!(reloaded.get_string("k"), None);
    }

    #[tokio::test]
    async fn test_save_refreshes_expiry() {
        let manager = manager();

        let session = manager.load(None).await;
        session.put("k", "v");
        let before = chrono::Utc::now().timestamp_millis();
        manager.save(&session).await.unwrap();

        let reloaded = manager.load(Some(&cookie_token(
            &manager.save(&session).await.unwrap().unwrap(),
        )))
        .await;
        let state_expiry = reloaded.state().record.expires_at_ms;
        assert!(state_expiry >= before + manager.config().idle_ttl_ms() - 1000);
    }
}
