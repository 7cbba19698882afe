//! Signature configuration file: loading, validation and resolution.

pub mod template;

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, GitError};
use crate::git::{RepositoryHandle, select_remote_url};
use crate::signature::resolve_best_signature;

pub use crate::signature::SignatureConfig;
pub use template::generate_config_template;

/// Top-level configuration: signatures in priority order for ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitConfig {
    #[serde(default)]
    pub signatures: Vec<SignatureConfig>,
}

impl CommitConfig {
    /// Check each signature for missing fields.
    ///
    /// Returns human-readable warnings; an incomplete signature is still
    /// usable, so nothing here is an error.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (idx, signature) in self.signatures.iter().enumerate() {
            if signature.username.is_empty() {
                warnings.push(format!("signature[{idx}] missing username"));
            }
            if signature.address().is_empty() {
                warnings.push(format!("signature[{idx}] missing mailbox (mailbox or eddress)"));
            }
            if signature.remote_patterns.is_empty() {
                warnings.push(format!("signature[{idx}] missing remote patterns"));
            }
        }

        warnings
    }

    /// Best signature for `remote_url`, see [`resolve_best_signature`].
    pub fn match_signature(&self, remote_url: &str) -> Option<&SignatureConfig> {
        resolve_best_signature(remote_url, &self.signatures)
    }

    /// Resolve the signature for a repository from its remotes.
    ///
    /// A repository without a usable remote resolves to `None`.
    pub fn resolve_signature<R: RepositoryHandle + ?Sized>(
        &self,
        repo: &R,
    ) -> Result<Option<&SignatureConfig>, GitError> {
        let remotes = repo.list_remotes()?;

        let Some(remote_url) = select_remote_url(&remotes) else {
            debug!("No remote URL found, skipping signature resolution");
            return Ok(None);
        };
        debug!("Remote URL: {}", remote_url);

        let signature = self.match_signature(remote_url);
        match signature {
            Some(s) => debug!("Matched signature: {}", s.name),
            None => debug!("No signature matches {}", remote_url),
        }

        Ok(signature)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::SerializeFailed)
    }
}

/// Load and validate a configuration file.
///
/// Validation warnings are logged, never returned as errors.
pub fn load_config(path: &Path) -> Result<CommitConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let config: CommitConfig =
        serde_json::from_str(&data).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

    for warning in config.validate() {
        warn!("{}", warning);
    }

    debug!(
        "Loaded {} signature(s) from {}",
        config.signatures.len(),
        path.display()
    );
    Ok(config)
}

/// Write a configuration file atomically.
///
/// The JSON is written to a temporary file next to `path` and then
/// renamed over it, so readers never see a partial file.
pub fn write_config(path: &Path, config: &CommitConfig) -> Result<(), ConfigError> {
    let json = config.to_json_pretty()?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(ConfigError::WriteFailed)?;
    writeln!(tmp, "{json}").map_err(ConfigError::WriteFailed)?;
    tmp.persist(path)
        .map_err(|e| ConfigError::WriteFailed(e.error))?;

    Ok(())
}
