//! Tree-driven operations
//!
//! Decides which rebases and branch deletions to issue for a tree. The
//! decisions are plain data; running them is up to the caller.

use std::collections::HashSet;

use crate::tree::{Branch, Tree};

/// Rebase `branch` onto `onto`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseStep {
    pub branch: String,
    pub onto: String,
}

/// Local names sharing a commit with a name that is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasGroup {
    /// Commit the names point at
    pub commit: String,
    /// The surviving name
    pub keeper: String,
    /// Names to delete
    pub aliases: Vec<String>,
}

/// Local names of a branch in sorted order
pub fn local_names<'a>(
    branch: &'a Branch,
    remote_names: &'a HashSet<String>,
) -> impl Iterator<Item = &'a String> + 'a {
    branch.names.iter().filter(move |name| !remote_names.contains(*name))
}

/// Ref to rebase children of `branch` onto: its first local name, else any
/// name, else the same for the nearest labeled ancestor
fn upstream_ref(tree: &Tree, branch: &Branch, remote_names: &HashSet<String>) -> Option<String> {
    std::iter::once(branch)
        .chain(tree.ancestors(branch))
        .find(|b| b.is_labeled())
        .and_then(|b| local_names(b, remote_names).next().or_else(|| b.names.iter().next()))
        .cloned()
}

/// Rebases bringing every local branch on top of its parent, root first.
///
/// Remote-only branches are not rebased but their children still are.
/// Branches linked under several parents are handled under their first
/// discoverer only.
pub fn rebase_plan(tree: &Tree, remote_names: &HashSet<String>) -> Vec<RebaseStep> {
    let mut steps = Vec::new();
    let mut pending: Vec<&Branch> = tree.tree_children(tree.root()).collect();
    pending.reverse();

    while let Some(branch) = pending.pop() {
        let name = local_names(branch, remote_names).next();
        let onto = tree
            .parent(branch)
            .and_then(|parent| upstream_ref(tree, parent, remote_names));
        if let (false, Some(name), Some(onto)) = (branch.is_remote, name, onto) {
            steps.push(RebaseStep {
                branch: name.clone(),
                onto,
            });
        }

        let children: Vec<&Branch> = tree.tree_children(branch).collect();
        pending.extend(children.into_iter().rev());
    }

    steps
}

/// Alias branches to delete.
///
/// For every branch with several local names one name survives: the
/// first protected one, else the first with an upstream, else the first
/// in order. Protected names and `head_branch` are never deleted.
pub fn alias_plan(
    tree: &Tree,
    remote_names: &HashSet<String>,
    protected: &[String],
    has_upstream: impl Fn(&str) -> bool,
    head_branch: Option<&str>,
) -> Vec<AliasGroup> {
    tree.branches()
        .filter_map(|branch| {
            let names: Vec<&String> = local_names(branch, remote_names).collect();
            if names.len() < 2 {
                return None;
            }

            let keeper = protected
                .iter()
                .find(|p| names.contains(p))
                .or_else(|| names.iter().copied().find(|n| has_upstream(n)))
                .or_else(|| names.first().copied())?;

            let aliases: Vec<String> = names
                .iter()
                .filter(|n| **n != keeper && !protected.contains(n))
                .filter(|n| Some(n.as_str()) != head_branch)
                .map(|n| n.to_string())
                .collect();
            if aliases.is_empty() {
                return None;
            }

            Some(AliasGroup {
                commit: branch.id.clone(),
                keeper: keeper.clone(),
                aliases,
            })
        })
        .collect()
}
