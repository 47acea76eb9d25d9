//! Session Token Signing
//!
//! The cookie value is `"{session_id}.{signature}"` where the signature is
//! an HMAC-SHA256 over the id, base64url encoded. Verification happens
//! before any store lookup, so forged tokens cost no backend round-trip.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Produce the signed cookie token for a session id
pub fn sign(secret: &[u8; 32], session_id: Uuid) -> String {
    let id = session_id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", id, platform::crypto::to_base64url(&signature))
}

/// Verify a presented token and extract the session id.
///
/// Returns `None` for any malformed, truncated, or tampered token; the MAC
/// comparison is constant-time.
pub fn verify(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (id, signature_b64) = token.split_once('.')?;

    let signature = platform::crypto::from_base64url(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(id.as_bytes());
    mac.verify_slice(&signature).ok()?;

    id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> [u8; 32] {
        [7u8; 32]
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let id = Uuid::new_v4();
        let token = sign(&secret(), id);
        assert_eq!(verify(&secret(), &token), Some(id));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&secret(), Uuid::new_v4());
        assert_eq!(verify(&[8u8; 32], &token), None);
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = sign(&secret(), Uuid::new_v4());
        let other = Uuid::new_v4().to_string();
        let signature = token.split_once('.').unwrap().1;
        let forged = format!("{other}.{signature}");
        assert_eq!(verify(&secret(), &forged), None);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let id = Uuid::new_v4();
        let token = sign(&secret(), id);
        let mut forged = token.clone();
        // flip the final signature character
        let last = forged.pop().unwrap();
        forged.push(if last == 'A' { 'B' } else { 'A' });
        assert_eq!(verify(&secret(), &forged), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(verify(&secret(), ""), None);
        assert_eq!(verify(&secret(), "no-separator"), None);
        assert_eq!(verify(&secret(), "a.b.c"), None);
        assert_eq!(verify(&secret(), "not-a-uuid.AAAA"), None);
        assert_eq!(verify(&secret(), &format!("{}.", Uuid::new_v4())), None);
    }
}
