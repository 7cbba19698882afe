//! Commit flags and the stage/format/commit workflow.

pub mod flags;
pub mod workflow;

pub use flags::CommitFlags;
pub use workflow::{CommitOutcome, resolve_author, run_commit};
