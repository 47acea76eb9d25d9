//! Form Payloads
//!
//! Field names match the rendered forms; everything defaults to empty so a
//! missing field becomes a validation error rather than a decode rejection.
//! The `csrf_token` field is consumed by the CSRF guard before these are
//! decoded and is deliberately absent here.

use serde::Deserialize;

/// POST /user/signup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /user/login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /user/password
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordChangeForm {
    #[serde(rename = "currentPassword", default)]
    pub current_password: String,
    #[serde(rename = "newPassword", default)]
    pub new_password: String,
}
