//! Options for one commit run.

use serde::Serialize;
use tracing::debug;

use crate::signature::SignatureConfig;

/// Options controlling a commit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitFlags {
    /// Author name; empty means "not provided".
    pub username: String,
    /// Preferred author email; empty means "not provided".
    pub mailbox: String,
    /// Fallback author email, used when `mailbox` is empty.
    pub eddress: String,
    pub message: String,
    /// Rewrite the previous commit instead of creating one.
    pub amend: bool,
    /// Amend even when the commit has been pushed.
    pub force: bool,
    /// Stage changes without committing.
    pub no_commit: bool,
    /// Format changed source files before committing.
    pub format: bool,
    /// Fill missing author fields from git config.
    pub auto_sign: bool,
}

impl CommitFlags {
    /// Warnings about flag combinations that are probably mistakes.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.force && !self.amend {
            warnings.push("force flag set but amend is disabled - force has no effect".to_string());
        }

        if self.no_commit && !self.message.is_empty() {
            warnings.push("commit message provided but no-commit flag is set".to_string());
        }

        if !self.auto_sign && self.username.is_empty() && self.address().is_empty() {
            warnings.push("no authentication info provided and auto-sign disabled".to_string());
        }

        warnings
    }

    /// Author email: `mailbox`, else `eddress`, else empty.
    pub fn address(&self) -> &str {
        if self.mailbox.is_empty() {
            &self.eddress
        } else {
            &self.mailbox
        }
    }

    /// Overlay a resolved signature onto these flags.
    ///
    /// Non-empty signature fields replace the flag values; empty ones leave
    /// them as they are. The signature address is written to both address
    /// fields.
    pub fn apply_signature(&mut self, signature: Option<&SignatureConfig>) {
        let Some(signature) = signature else {
            return;
        };
        debug!("Applying signature config: {}", signature.name);

        if !signature.username.is_empty() {
            self.username = signature.username.clone();
        }
        let address = signature.address();
        if !address.is_empty() {
            self.mailbox = address.to_string();
            self.eddress = address.to_string();
        }
    }
}
