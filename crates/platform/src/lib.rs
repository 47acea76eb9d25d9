//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, constant-time compare, base64url)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management
//! - Minimal HTML page shell and escaping

pub mod cookie;
pub mod crypto;
pub mod html;
pub mod password;
