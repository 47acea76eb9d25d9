//! Form Payloads

use serde::Deserialize;

/// POST /snippet/create
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Lifetime in days; must be one of the permitted options
    #[serde(default)]
    pub expires: i64,
}

impl Default for SnippetForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: 365,
        }
    }
}
