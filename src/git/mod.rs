//! Git operations using git2-rs.

pub mod remote;
pub mod repository;

pub use remote::select_remote_url;
pub use repository::{Author, GitRepository, RemoteInfo, RepositoryHandle};
