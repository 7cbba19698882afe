//! Error types for commitmate modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to read repository status: {0}")]
    StatusFailed(#[source] git2::Error),

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Nothing to amend: the repository has no commits yet")]
    NothingToAmend,

    #[error("Commit {commit} has already been pushed to a remote. Use --force to amend it anyway.")]
    AmendPushed { commit: String },

    #[error("Failed to read remotes: {0}")]
    RemoteFailed(#[source] git2::Error),
}

/// Errors from configuration file operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Failed to write config: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from source formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Formatter '{0}' not found. Install it with: rustup component add rustfmt")]
    NotInstalled(String),

    #[error("Failed to spawn formatter: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Failed to format {}: {stderr}", path.display())]
    InvalidSyntax { path: PathBuf, stderr: String },
}

/// Errors from the commit workflow.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
