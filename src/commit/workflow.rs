//! Stage, format and commit orchestration.

use git2::Oid;
use tracing::{debug, warn};

use crate::commit::flags::CommitFlags;
use crate::error::CommitError;
use crate::format::{SourceFormatter, default_allow_format, format_changed_files};
use crate::git::{Author, RepositoryHandle};

/// Author name used when neither flags, config nor git config provide one.
pub const DEFAULT_AUTHOR_NAME: &str = "commitmate";

/// Author email used when neither flags, config nor git config provide one.
pub const DEFAULT_AUTHOR_EMAIL: &str = "commitmate@localhost";

/// Message for new commits created without `--message`.
pub const DEFAULT_COMMIT_MESSAGE: &str = "update";

/// What a commit run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing to commit.
    NoChanges,
    /// Changes staged, commit skipped on request.
    StagedOnly,
    Committed(Oid),
    Amended(Oid),
}

/// Stage everything, optionally format, then commit or amend.
///
/// Steps:
/// 1. Stage all changes (`git add -A`)
/// 2. If `flags.format`: format changed sources, then stage again
/// 3. Stop when there is nothing to commit, amend included
/// 4. Stop when `flags.no_commit` is set
/// 5. Commit or amend with the resolved author
pub fn run_commit<R>(
    repo: &R,
    formatter: Option<&dyn SourceFormatter>,
    flags: &CommitFlags,
) -> Result<CommitOutcome, CommitError>
where
    R: RepositoryHandle + ?Sized,
{
    debug!("Commit flags: {:?}", flags);

    let status = repo.status()?;
    debug!("Status before staging: {:?}", status);

    repo.stage_all()?;
    let mut status = repo.status()?;
    debug!("Status after staging: {:?}", status);

    if flags.format && format_sources(repo, formatter, &status)? {
        repo.stage_all()?;
        status = repo.status()?;
        debug!("Status after formatting: {:?}", status);
    }

    if status.is_empty() {
        debug!("No changes to commit");
        return Ok(CommitOutcome::NoChanges);
    }

    if flags.no_commit {
        debug!("Changes staged, skipping commit");
        return Ok(CommitOutcome::StagedOnly);
    }

    let author = resolve_author(repo, flags);
    debug!("Committing as {} <{}>", author.name, author.email);

    if flags.amend {
        let oid = repo.amend_commit(&author, &flags.message, flags.force)?;
        Ok(CommitOutcome::Amended(oid))
    } else {
        let message = if flags.message.is_empty() {
            DEFAULT_COMMIT_MESSAGE
        } else {
            flags.message.as_str()
        };
        let oid = repo.commit(&author, message)?;
        Ok(CommitOutcome::Committed(oid))
    }
}

/// Returns whether a formatting pass ran.
fn format_sources<R>(
    repo: &R,
    formatter: Option<&dyn SourceFormatter>,
    status: &[String],
) -> Result<bool, CommitError>
where
    R: RepositoryHandle + ?Sized,
{
    let Some(formatter) = formatter else {
        warn!("Formatting requested but no formatter is available");
        return Ok(false);
    };
    let Some(root) = repo.workdir() else {
        warn!("Repository has no working tree, skipping formatting");
        return Ok(false);
    };

    let formatted = format_changed_files(&root, status, formatter, default_allow_format)?;
    debug!("Formatted {} file(s)", formatted.len());
    Ok(true)
}

/// Author from flags, then git config (with auto-sign), then the tool
/// identity. Falling back to the tool identity logs a warning.
pub fn resolve_author<R>(repo: &R, flags: &CommitFlags) -> Author
where
    R: RepositoryHandle + ?Sized,
{
    let mut name = flags.username.clone();
    let mut email = flags.address().to_string();

    if flags.auto_sign {
        if name.is_empty() {
            if let Some(value) = repo.config_value("user.name") {
                debug!("Using git config user.name: {}", value);
                name = value;
            }
        }
        if email.is_empty() {
            if let Some(value) = repo.config_value("user.email") {
                debug!("Using git config user.email: {}", value);
                email = value;
            }
        }
    }

    Author {
        name: or_tool_identity(name, "name", DEFAULT_AUTHOR_NAME),
        email: or_tool_identity(email, "email", DEFAULT_AUTHOR_EMAIL),
    }
}

fn or_tool_identity(value: String, field: &str, default: &str) -> String {
    if !value.is_empty() {
        return value;
    }
    warn!(
        "No author {} from flags, config or git config, committing as {}",
        field, default
    );
    default.to_string()
}
