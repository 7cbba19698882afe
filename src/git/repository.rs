//! Repository operations behind a mockable trait, backed by git2.

use std::path::{Path, PathBuf};

use git2::{
    Commit, ErrorCode, IndexAddOption, Oid, Repository, Signature, StatusOptions, Tree,
};
use tracing::debug;

use crate::error::GitError;

/// Author identity written into commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A configured remote and its fetch URL (empty when none is set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub url: String,
}

/// Version-control capabilities needed by the commit workflow.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryHandle {
    /// Paths with staged, unstaged or untracked changes, sorted.
    fn status(&self) -> Result<Vec<String>, GitError>;

    /// Stage every change in the working tree, like `git add -A`.
    fn stage_all(&self) -> Result<(), GitError>;

    /// Commit the index on HEAD.
    fn commit(&self, author: &Author, message: &str) -> Result<Oid, GitError>;

    /// Rewrite HEAD with the index, author and message.
    ///
    /// Refuses to rewrite a commit that a remote-tracking ref already
    /// contains unless `force` is set.
    fn amend_commit(&self, author: &Author, message: &str, force: bool) -> Result<Oid, GitError>;

    /// Remotes in enumeration order.
    fn list_remotes(&self) -> Result<Vec<RemoteInfo>, GitError>;

    /// A trimmed, non-empty git config value.
    fn config_value(&self, key: &str) -> Option<String>;

    /// Root of the working tree, `None` for bare repositories.
    fn workdir(&self) -> Option<PathBuf>;
}

/// [`RepositoryHandle`] over a git2 repository.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Discover the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// HEAD commit, or `None` on an unborn branch.
    fn head_commit(&self) -> Result<Option<Commit<'_>>, GitError> {
        match self.repo.head() {
            Ok(head) => head
                .peel_to_commit()
                .map(Some)
                .map_err(GitError::CommitFailed),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(GitError::CommitFailed(e)),
        }
    }

    fn index_tree(&self) -> Result<Tree<'_>, GitError> {
        let mut index = self.repo.index().map_err(GitError::CommitFailed)?;
        let tree_id = index.write_tree().map_err(GitError::CommitFailed)?;
        self.repo.find_tree(tree_id).map_err(GitError::CommitFailed)
    }

    /// Whether any `refs/remotes/*` ref contains `oid`.
    fn is_pushed(&self, oid: Oid) -> Result<bool, GitError> {
        let refs = self
            .repo
            .references_glob("refs/remotes/*")
            .map_err(GitError::RemoteFailed)?;

        for reference in refs {
            let reference = reference.map_err(GitError::RemoteFailed)?;
            let Some(target) = reference.target() else {
                continue;
            };
            if target == oid
                || self
                    .repo
                    .graph_descendant_of(target, oid)
                    .map_err(GitError::RemoteFailed)?
            {
                debug!("Commit {} is contained in {:?}", oid, reference.name());
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl RepositoryHandle for GitRepository {
    fn status(&self) -> Result<Vec<String>, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(GitError::StatusFailed)?;

        let mut paths: Vec<String> = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();
        paths.sort();
        paths.dedup();

        Ok(paths)
    }

    fn stage_all(&self) -> Result<(), GitError> {
        let mut index = self.repo.index().map_err(GitError::StagingFailed)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(GitError::StagingFailed)?;
        // add_all does not drop entries for deleted files
        index
            .update_all(["*"].iter(), None)
            .map_err(GitError::StagingFailed)?;
        index.write().map_err(GitError::StagingFailed)?;
        Ok(())
    }

    fn commit(&self, author: &Author, message: &str) -> Result<Oid, GitError> {
        let tree = self.index_tree()?;
        let sig = Signature::now(&author.name, &author.email).map_err(GitError::CommitFailed)?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(GitError::CommitFailed)
    }

    fn amend_commit(&self, author: &Author, message: &str, force: bool) -> Result<Oid, GitError> {
        let head = self.head_commit()?.ok_or(GitError::NothingToAmend)?;

        if !force && self.is_pushed(head.id())? {
            return Err(GitError::AmendPushed {
                commit: head.id().to_string(),
            });
        }

        let tree = self.index_tree()?;
        let previous_message = head.message().unwrap_or("");
        let message = if message.is_empty() {
            previous_message
        } else {
            message
        };

        let previous_author = head.author();
        let unchanged = tree.id() == head.tree_id()
            && message == previous_message
            && previous_author.name() == Some(author.name.as_str())
            && previous_author.email() == Some(author.email.as_str());
        if unchanged {
            debug!("Amend would not change {}, keeping it", head.id());
            return Ok(head.id());
        }

        let sig = Signature::now(&author.name, &author.email).map_err(GitError::CommitFailed)?;
        head.amend(
            Some("HEAD"),
            Some(&sig),
            Some(&sig),
            None,
            Some(message),
            Some(&tree),
        )
        .map_err(GitError::CommitFailed)
    }

    fn list_remotes(&self) -> Result<Vec<RemoteInfo>, GitError> {
        let names = self.repo.remotes().map_err(GitError::RemoteFailed)?;

        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            let remote = self.repo.find_remote(name).map_err(GitError::RemoteFailed)?;
            remotes.push(RemoteInfo {
                name: name.to_string(),
                url: remote.url().unwrap_or("").to_string(),
            });
        }

        Ok(remotes)
    }

    fn config_value(&self, key: &str) -> Option<String> {
        let value = match self.repo.config().and_then(|c| c.get_string(key)) {
            Ok(value) => value,
            Err(e) => {
                debug!("Cannot read git config {}: {}", key, e);
                return None;
            }
        };
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn workdir(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }
}
