//! Branch and HEAD discovery
//!
//! Collects the checked-out commit and the local and remote branch
//! names the tree is built from.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use git2::{BranchType, Repository};

use crate::error::Result;

/// Refs of a repository relevant to the branch tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refs {
    /// Full hash of the checked-out commit
    pub head: String,
    /// Checked-out branch (if not detached)
    pub head_branch: Option<String>,
    /// Local branch names
    pub local: BTreeSet<String>,
    /// Remote-tracking branch names, e.g. `origin/main`
    pub remote: BTreeSet<String>,
    /// Local branch -> its upstream remote-tracking branch
    pub upstreams: BTreeMap<String, String>,
}

/// Names the reader should resolve, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracking {
    /// Every name to track, local first
    pub names: Vec<String>,
    /// The subset of `names` that are remote-tracking refs
    pub remote: HashSet<String>,
}

impl Refs {
    /// Decide which names to track.
    ///
    /// Local branches are always tracked, along with each local branch's
    /// upstream. With `all_remotes`, every branch of `remote` is tracked too.
    pub fn tracking(&self, remote: &str, all_remotes: bool) -> Tracking {
        let prefix = format!("{remote}/");
        let remote_names: BTreeSet<&String> = self
            .remote
            .iter()
            .filter(|name| {
                let is_upstream = self.upstreams.values().any(|upstream| upstream == *name);
                is_upstream || (all_remotes && name.starts_with(&prefix))
            })
            .collect();

        Tracking {
            names: self.local.iter().chain(remote_names.iter().copied()).cloned().collect(),
            remote: remote_names.into_iter().cloned().collect(),
        }
    }

    /// Whether `name` has an upstream configured and present
    pub fn has_upstream(&self, name: &str) -> bool {
        self.upstreams
            .get(name)
            .is_some_and(|upstream| self.remote.contains(upstream))
    }
}

/// Read HEAD and branch names from the repository at `repo_path`
pub fn read_refs(repo_path: &Path) -> Result<Refs> {
    let repo = Repository::discover(repo_path)?;

    let head_ref = repo.head()?;
    let head = head_ref.peel_to_commit()?.id().to_string();
    let head_branch = if head_ref.is_branch() {
        head_ref.shorthand().map(|s| s.to_string())
    } else {
        // Detached HEAD
        None
    };

    let mut refs = Refs {
        head,
        head_branch,
        ..Refs::default()
    };

    for branch in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = branch?;
        let Some(name) = branch.name()?.map(str::to_string) else {
            continue;
        };
        if let Ok(upstream) = branch.upstream() {
            if let Some(upstream_name) = upstream.name()? {
                refs.upstreams.insert(name.clone(), upstream_name.to_string());
            }
        }
        refs.local.insert(name);
    }

    for branch in repo.branches(Some(BranchType::Remote))? {
        let (branch, _) = branch?;
        match branch.name()? {
            // Symbolic remote HEADs never show up as decorations of their own
            Some(name) if !name.ends_with("/HEAD") => {
                refs.remote.insert(name.to_string());
            }
            _ => {}
        }
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs() -> Refs {
        Refs {
            head: "6b261a7".to_string(),
            head_branch: Some("fixes".to_string()),
            local: ["master", "fixes", "feature"].into_iter().map(String::from).collect(),
            remote: ["origin/master", "origin/release2.2", "upstream/master"]
                .into_iter()
                .map(String::from)
                .collect(),
            upstreams: [("master".to_string(), "origin/master".to_string())].into_iter().collect(),
        }
    }

    #[test]
    fn test_tracks_locals_and_upstreams() {
        let tracking = refs().tracking("origin", false);

        assert_eq!(tracking.names, ["feature", "fixes", "master", "origin/master"]);
        assert_eq!(tracking.remote, HashSet::from(["origin/master".to_string()]));
    }

    #[test]
    fn test_tracks_all_branches_of_remote() {
        let tracking = refs().tracking("origin", true);

        assert_eq!(
            tracking.names,
            ["feature", "fixes", "master", "origin/master", "origin/release2.2"]
        );
        assert!(!tracking.remote.contains("upstream/master"));
    }

    #[test]
    fn test_has_upstream() {
        let refs = refs();
        assert!(refs.has_upstream("master"));
        assert!(!refs.has_upstream("fixes"));
    }
}
