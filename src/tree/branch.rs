//! Branch nodes
//!
//! A branch is a run of commits between two branch points. It is named
//! after the hash of its newest commit and may carry any number of ref
//! names (none for an unlabeled divergence point).

use std::collections::BTreeSet;

use super::commit::{Commit, short_id};

/// Handle of a branch inside its [`Tree`](super::Tree) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub(crate) usize);

/// Working tree state attached to the active branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    /// Changes added to the index
    pub staged: bool,
    /// Modified or deleted tracked files not yet staged
    pub unstaged: bool,
    /// Files git does not track yet
    pub untracked: bool,
}

impl Status {
    pub fn is_clean(&self) -> bool {
        !(self.staged || self.unstaged || self.untracked)
    }

    /// Whether tracked content differs from HEAD
    pub fn has_changes(&self) -> bool {
        self.staged || self.unstaged
    }
}

/// A node of the branch tree
#[derive(Debug, Clone)]
pub struct Branch {
    /// Hash of the commit at which this branch was distinguished
    pub id: String,
    /// Ref names pointing at `id`
    pub names: BTreeSet<String>,
    /// Whether the checked-out commit belongs to this branch
    pub is_active: bool,
    /// Whether every name of this branch is a remote-tracking ref
    pub is_remote: bool,
    /// Commits exclusive to this branch, newest first
    pub commits: Vec<Commit>,
    /// Working tree status (only ever set on the active branch)
    pub status: Status,
    pub(crate) parent: Option<BranchId>,
    pub(crate) children: Vec<BranchId>,
}

impl Branch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names: BTreeSet::new(),
            is_active: false,
            is_remote: false,
            commits: Vec::new(),
            status: Status::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
        self.commits = commits;
        self
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Child handles in discovery order
    pub fn children(&self) -> &[BranchId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_labeled(&self) -> bool {
        !self.names.is_empty()
    }

    /// Label shown by the renderer: sorted names, or the short hash
    /// for an unlabeled branch point
    pub fn display_name(&self) -> String {
        if self.names.is_empty() {
            return short_id(&self.id).to_string();
        }
        self.names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    /// Append commits not already part of this branch, keeping order
    pub(crate) fn absorb_commits(&mut self, commits: impl IntoIterator<Item = Commit>) {
        for commit in commits {
            if !self.commits.contains(&commit) {
                self.commits.push(commit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let branch = Branch::new("e85997d").with_names(["master", "fixes"]);
        assert_eq!(branch.display_name(), "fixes, master");

        let unlabeled = Branch::new("e5ff570c0ffee");
        assert_eq!(unlabeled.display_name(), "e5ff570");
        assert!(!unlabeled.is_labeled());
    }

    #[test]
    fn test_absorb_commits_skips_duplicates() {
        let mut branch = Branch::new("6b261a7").with_commits(vec![
            Commit::new("6b261a7", vec!["541b298".to_string()], "Fixed the CLI"),
            Commit::new("541b298", vec![], "Merge all"),
        ]);

        branch.absorb_commits(vec![
            Commit::new("6b261a7", vec![], "Fixed the CLI"),
            Commit::new("541b298", vec![], "Merge all"),
            Commit::new("76094a4", vec![], "Fixed the UI"),
        ]);

        let ids: Vec<_> = branch.commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["6b261a7", "541b298", "76094a4"]);
    }

    #[test]
    fn test_status_flags() {
        assert!(Status::default().is_clean());

        let status = Status {
            untracked: true,
            ..Status::default()
        };
        assert!(!status.is_clean());
        assert!(!status.has_changes());
    }
}
