//! Tree builder
//!
//! Walks the adjacency map forward from the root, cutting the commit
//! graph into branch segments at every branch point.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::branch::{Branch, BranchId};
use super::reader::TreeData;
use super::{Commit, Tree};

/// Build the branch tree described by `data`.
///
/// `remote_names` lists the tracked names that are remote-tracking refs;
/// a branch carrying only such names is flagged as remote.
pub fn build_tree(data: &TreeData, remote_names: &HashSet<String>) -> Tree {
    TreeBuilder {
        data,
        remote_names,
        live: live_commits(data),
    }
    .build()
}

/// Commits from which HEAD or a branch tip can be reached going forward.
/// The rest only lead to untracked refs and never become part of the tree.
fn live_commits(data: &TreeData) -> HashSet<&str> {
    let is_target = |commit: &str| {
        data.head.as_deref() == Some(commit) || data.branch_tips.contains_key(commit)
    };

    let mut live = HashSet::new();
    let mut seen = HashSet::new();
    // Post-order: a commit is settled once all of its children are
    let mut stack = vec![(data.root.as_str(), false)];

    while let Some((commit, expanded)) = stack.pop() {
        if expanded {
            let children = data.children(commit);
            if is_target(commit) || children.iter().any(|c| live.contains(c.as_str())) {
                live.insert(commit);
            }
        } else if seen.insert(commit) {
            stack.push((commit, true));
            stack.extend(data.children(commit).iter().map(|child| (child.as_str(), false)));
        }
    }

    live
}

struct TreeBuilder<'a> {
    data: &'a TreeData,
    remote_names: &'a HashSet<String>,
    live: HashSet<&'a str>,
}

impl<'a> TreeBuilder<'a> {
    fn build(&self) -> Tree {
        let root = self.data.root.as_str();
        let mut tree = Tree::new(self.new_branch(root, &[root]));
        let mut visited: HashMap<&str, BranchId> = HashMap::new();
        visited.insert(root, tree.root_handle());

        // Depth-first worklist of (first commit of a run, parent branch).
        // Children are pushed in reverse so they pop in discovery order.
        let mut pending: Vec<(&str, BranchId)> = Vec::new();
        self.schedule_children(root, tree.root_handle(), &mut pending);

        while let Some((start, parent)) = pending.pop() {
            let Some((point, run)) = self.walk(start) else {
                trace!(start, "dropping dead-end run");
                continue;
            };

            match visited.get(point) {
                Some(&existing) => {
                    trace!(point, "reconverged on known branch point");
                    let commits = self.commits_of(&run);
                    tree.branch_mut(existing).absorb_commits(commits);
                    tree.link_child(parent, existing);
                }
                None => {
                    let handle = tree.add_child(parent, self.new_branch(point, &run));
                    visited.insert(point, handle);
                    self.schedule_children(point, handle, &mut pending);
                }
            }
        }

        debug!(branches = tree.len(), "built branch tree");
        tree
    }

    fn schedule_children(
        &self,
        commit: &str,
        parent: BranchId,
        pending: &mut Vec<(&'a str, BranchId)>,
    ) {
        let children: Vec<&'a str> = self.live_children(commit).collect();
        pending.extend(children.into_iter().rev().map(|child| (child, parent)));
    }

    /// Forward children that lead to HEAD or a tracked tip
    fn live_children(&self, commit: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.data
            .children(commit)
            .iter()
            .map(String::as_str)
            .filter(|child| self.live.contains(child))
    }

    /// Follow first live children from `start` until a branch point.
    /// Returns the branch point and the run, newest first, or `None`
    /// when the run ends without reaching one.
    fn walk(&self, start: &'a str) -> Option<(&'a str, Vec<&'a str>)> {
        let mut run = Vec::new();
        let mut current = start;

        loop {
            run.push(current);
            if self.is_branch_point(current) {
                run.reverse();
                return Some((current, run));
            }
            current = self.live_children(current).next()?;
        }
    }

    fn is_branch_point(&self, commit: &str) -> bool {
        commit == self.data.root
            || self.data.head.as_deref() == Some(commit)
            || self.data.branch_tips.contains_key(commit)
            || self.live_children(commit).nth(1).is_some()
    }

    fn new_branch(&self, point: &str, run: &[&str]) -> Branch {
        let names = self.data.branch_tips.get(point).cloned().unwrap_or_default();
        let is_remote =
            !names.is_empty() && names.iter().all(|name| self.remote_names.contains(name));

        let mut branch = Branch::new(point)
            .with_names(names)
            .with_commits(self.commits_of(run));
        branch.is_remote = is_remote;
        branch.is_active = self.data.head.as_deref() == Some(point);
        branch
    }

    fn commits_of(&self, run: &[&str]) -> Vec<Commit> {
        run.iter()
            .filter_map(|id| self.data.commits.get(*id).cloned())
            .collect()
    }
}
