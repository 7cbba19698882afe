//! `rustfmt` subprocess formatter.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::SourceFormatter;
use crate::error::FormatError;

/// Formatter binary used when no override is set.
const DEFAULT_BINARY: &str = "rustfmt";

/// Environment variable to override the formatter binary.
const BINARY_ENV_VAR: &str = "COMMITMATE_RUSTFMT";

/// Edition passed to rustfmt for files outside a cargo project.
const DEFAULT_EDITION: &str = "2021";

/// Get the configured formatter binary.
fn binary_name() -> String {
    match env::var(BINARY_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => DEFAULT_BINARY.to_string(),
    }
}

/// Formats files in place by running `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    binary: PathBuf,
    edition: String,
}

impl Rustfmt {
    /// Locate the formatter binary.
    ///
    /// Uses the `which` crate so it works the same on Windows and Unix.
    pub fn locate() -> Result<Self, FormatError> {
        let name = binary_name();
        let binary = which::which(&name).map_err(|_| FormatError::NotInstalled(name))?;
        debug!("Using formatter at {}", binary.display());
        Ok(Self {
            binary,
            edition: DEFAULT_EDITION.to_string(),
        })
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }
}

impl SourceFormatter for Rustfmt {
    fn format_file(&self, path: &Path) -> Result<(), FormatError> {
        let output = Command::new(&self.binary)
            .args(["--edition", &self.edition])
            .arg(path)
            .output()
            .map_err(FormatError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::InvalidSyntax {
                path: path.to_path_buf(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
