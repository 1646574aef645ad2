//! Error types for branchtree

use thiserror::Error;

/// Errors raised while reading history, building the branch tree,
/// or driving git on its behalf.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed log entry: {line:?}")]
    MalformedEntry { line: String },

    #[error("Branch '{name}' was never found in the commit history")]
    UnresolvedBranch { name: String },

    #[error("No common ancestor found for the tracked branches after {consumed} commits")]
    AmbiguousRoot { consumed: usize },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Command `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Working tree has local changes; commit or stash them first")]
    DirtyWorkingTree,
}

pub type Result<T> = std::result::Result<T, Error>;
