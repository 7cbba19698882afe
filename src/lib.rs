//! commitmate - A CLI commit helper that picks the author identity from the remote URL.
//!
//! # Overview
//!
//! commitmate stages every change, optionally runs rustfmt over the changed
//! sources, and commits or amends. The author can come from a JSON config
//! file whose signatures carry glob-style remote URL patterns; the most
//! specific pattern matching the repository's remote wins.

pub mod commit;
pub mod config;
pub mod error;
pub mod format;
pub mod git;
pub mod signature;

// Re-export commonly used types
pub use commit::{CommitFlags, CommitOutcome, run_commit};
pub use config::{CommitConfig, generate_config_template, load_config};
pub use error::{CommitError, ConfigError, FormatError, GitError};
pub use git::{Author, GitRepository, RemoteInfo, RepositoryHandle};
pub use signature::{SignatureConfig, match_remote_pattern, resolve_best_signature};
