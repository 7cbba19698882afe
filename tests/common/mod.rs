//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Commit, Oid, Repository, Signature};

use commitmate::GitRepository;

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a config fixture.
pub fn config_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("configs").join(name)
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// Create a repository with `user.name`/`user.email` set and one commit.
    pub fn with_initial_commit() -> Self {
        let test_repo = Self::new();
        test_repo.set_user("Repo User", "repo@example.com");
        test_repo.write_file("README.md", "# test\n");
        test_repo.commit_all("initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the repository through the library's handle.
    pub fn handle(&self) -> GitRepository {
        GitRepository::discover(self.path()).expect("Failed to open test repo")
    }

    /// Set `user.name` and `user.email` in the repository config.
    pub fn set_user(&self, name: &str, email: &str) {
        let mut config = self.repo.config().expect("Failed to open config");
        config.set_str("user.name", name).expect("Failed to set user.name");
        config.set_str("user.email", email).expect("Failed to set user.email");
    }

    /// Write a file relative to the repository root, creating parent dirs.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path().join(relative)).expect("Failed to read test file")
    }

    /// Stage everything and commit as the test signature, bypassing the library.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com")
            .expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Add a remote with the given URL.
    pub fn add_remote(&self, name: &str, url: &str) {
        self.repo.remote(name, url).expect("Failed to add remote");
    }

    /// Point `refs/remotes/<remote>/main` at `oid`, as if it had been pushed.
    pub fn mark_pushed(&self, remote: &str, oid: Oid) {
        self.repo
            .reference(
                &format!("refs/remotes/{}/main", remote),
                oid,
                true,
                "test push",
            )
            .expect("Failed to create remote ref");
    }

    pub fn head_commit(&self) -> Commit<'_> {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit")
    }

    pub fn commit_count(&self) -> usize {
        let mut revwalk = self.repo.revwalk().expect("Failed to create revwalk");
        revwalk.push_head().expect("Failed to push HEAD");
        revwalk.count()
    }
}
