//! Source formatting of changed files.

pub mod rustfmt;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::FormatError;

pub use rustfmt::Rustfmt;

/// Extension of the files the formatter understands.
pub const SOURCE_EXTENSION: &str = "rs";

/// A formatter that rewrites one file in place.
#[cfg_attr(test, mockall::automock)]
pub trait SourceFormatter {
    /// Reformat `path`. Fails with [`FormatError::InvalidSyntax`] when the
    /// file does not parse.
    fn format_file(&self, path: &Path) -> Result<(), FormatError>;
}

/// Default filter: skip build output and generated sources.
pub fn default_allow_format(path: &str) -> bool {
    let generated = path.starts_with("target/")
        || path.contains("/target/")
        || path.starts_with("generated/")
        || path.contains("/generated/")
        || path.ends_with(".generated.rs");
    !generated
}

/// Format changed source files under `root`.
///
/// `paths` are relative to `root` as reported by the repository status.
/// Only `.rs` files that `allow` accepts and that still exist are formatted.
/// Returns the formatted paths.
pub fn format_changed_files<F, A>(
    root: &Path,
    paths: &[String],
    formatter: &F,
    allow: A,
) -> Result<Vec<PathBuf>, FormatError>
where
    F: SourceFormatter + ?Sized,
    A: Fn(&str) -> bool,
{
    let mut formatted = Vec::new();

    for path in paths {
        if Path::new(path).extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }
        if !allow(path) {
            debug!("skip: {}", path);
            continue;
        }

        let full_path = root.join(path);
        // deleted files show up in status too
        if !full_path.is_file() {
            continue;
        }

        info!(path = %path, "formatting source file");
        formatter.format_file(&full_path)?;
        formatted.push(full_path);
    }

    Ok(formatted)
}
