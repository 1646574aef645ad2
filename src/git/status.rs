//! Working tree status
//!
//! Detects staged, unstaged and untracked changes in the working
//! directory so they can be shown on the active branch.

use std::path::Path;

use git2::{Repository, StatusOptions};

use crate::error::Result;
use crate::tree::Status;

/// Summarize the working directory state of the repository at `repo_path`
pub fn working_tree_status(repo_path: &Path) -> Result<Status> {
    let repo = Repository::discover(repo_path)?;

    let mut opts = StatusOptions::new();
    opts.include_untracked(true);
    opts.include_ignored(false);

    let statuses = repo.statuses(Some(&mut opts))?;

    Ok(statuses
        .iter()
        .fold(Status::default(), |status, entry| merge(status, entry.status())))
}

fn merge(mut status: Status, flags: git2::Status) -> Status {
    status.staged |= flags.intersects(
        git2::Status::INDEX_NEW
            | git2::Status::INDEX_MODIFIED
            | git2::Status::INDEX_DELETED
            | git2::Status::INDEX_RENAMED
            | git2::Status::INDEX_TYPECHANGE,
    );
    status.unstaged |= flags.intersects(
        git2::Status::WT_MODIFIED
            | git2::Status::WT_DELETED
            | git2::Status::WT_RENAMED
            | git2::Status::WT_TYPECHANGE,
    );
    status.untracked |= flags.contains(git2::Status::WT_NEW);
    status
}
