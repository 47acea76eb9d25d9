//! Session Configuration

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie attributes (name, HttpOnly, Secure, SameSite, Max-Age)
    pub cookie: CookieConfig,
    /// Secret key for HMAC token signing (32 bytes)
    pub secret: [u8; 32],
    /// Idle lifetime; an untouched session is treated as absent afterwards
    pub idle_ttl: Duration,
}

const IDLE_TTL: Duration = Duration::from_secs(12 * 3600);

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie: CookieConfig {
                max_age_secs: Some(IDLE_TTL.as_secs() as i64),
                ..CookieConfig::default()
            },
            secret: [0u8; 32],
            idle_ttl: IDLE_TTL,
        }
    }
}

impl SessionConfig {
    /// Config with a freshly generated random signing secret
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        Self {
            secret,
            ..Default::default()
        }
    }

    /// Config for development and tests: random secret, insecure cookie
    pub fn development() -> Self {
        let mut config = Self::with_random_secret();
        config.cookie.secure = false;
        config
    }

    /// Idle lifetime in milliseconds
    pub fn idle_ttl_ms(&self) -> i64 {
        self.idle_ttl.as_millis() as i64
    }
}
