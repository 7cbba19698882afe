//! Remote-based signature selection.

pub mod pattern;
pub mod resolve;

use serde::{Deserialize, Serialize};

pub use pattern::{NO_MATCH, count_non_wildcard_chars, match_remote_pattern};
pub use resolve::resolve_best_signature;

/// An author identity bound to a set of remote URL patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    /// Config name for reference in logs and templates.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    /// Preferred commit email. `email` is accepted as another key for it.
    #[serde(default, alias = "email")]
    pub mailbox: String,
    /// Fallback commit email, used when `mailbox` is empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub eddress: String,
    /// Patterns in priority order; `*` matches any run of characters.
    #[serde(default)]
    pub remote_patterns: Vec<String>,
}

impl SignatureConfig {
    /// Commit email: `mailbox`, else `eddress`, else empty.
    pub fn address(&self) -> &str {
        if self.mailbox.is_empty() {
            &self.eddress
        } else {
            &self.mailbox
        }
    }
}
