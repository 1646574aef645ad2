//! Commit records
//!
//! A commit as seen by the tree reconstruction: its hash, the hashes of
//! its immediate parents and its subject line.

/// Number of hash characters shown for abbreviated commit ids
pub const SHORT_ID_LEN: usize = 7;

/// Represents a git commit
#[derive(Debug, Clone)]
pub struct Commit {
    /// Commit hash
    pub id: String,
    /// Immediate parent hashes (empty for a root commit, two or more for a merge)
    pub parent_ids: Vec<String>,
    /// Commit subject (first line of message)
    pub message: String,
}

impl Commit {
    pub fn new(id: impl Into<String>, parent_ids: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_ids,
            message: message.into(),
        }
    }

    /// Abbreviated hash (7 characters)
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Commit {}

/// Abbreviate a commit hash for display
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
