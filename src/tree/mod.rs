//! Branch tree reconstruction
//!
//! Turns a newest-first commit history into a tree of branches:
//! - [`TreeReader`] folds log entries into adjacency and branch tips
//! - [`build_tree`] cuts the commit graph into [`Branch`] segments
//! - [`Tree`] owns the branches and answers navigation queries

mod branch;
mod builder;
mod commit;
mod reader;

use std::collections::{HashMap, HashSet};

pub use branch::{Branch, BranchId, Status};
pub use builder::build_tree;
pub use commit::{Commit, SHORT_ID_LEN, short_id};
pub use reader::{TreeData, TreeReader};

use crate::error::Result;
use crate::git::LogEntry;

/// Arena of branches rooted at the common ancestor of all tracked tips
#[derive(Debug, Clone)]
pub struct Tree {
    branches: Vec<Branch>,
    index: HashMap<String, BranchId>,
    root: BranchId,
    active: Option<BranchId>,
}

impl Tree {
    /// Create a tree holding only its root branch
    pub fn new(mut root: Branch) -> Self {
        root.parent = None;
        root.children.clear();
        let handle = BranchId(0);
        let active = root.is_active.then_some(handle);

        Self {
            index: HashMap::from([(root.id.clone(), handle)]),
            branches: vec![root],
            root: handle,
            active,
        }
    }

    /// Read `entries` and build the tree they describe in one go
    pub fn from_history<I>(
        head: Option<&str>,
        tracked: &[String],
        remote_names: &HashSet<String>,
        entries: I,
        include_commits: bool,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Result<LogEntry>>,
    {
        let data = TreeReader::new(include_commits).read(head, tracked, entries)?;
        Ok(build_tree(&data, remote_names))
    }

    /// Insert `child` under `parent`, returning its handle.
    /// A branch with an id already present is linked instead of duplicated.
    pub fn add_child(&mut self, parent: BranchId, mut child: Branch) -> BranchId {
        if let Some(&existing) = self.index.get(&child.id) {
            self.link_child(parent, existing);
            return existing;
        }

        let handle = BranchId(self.branches.len());
        child.parent = Some(parent);
        child.children.clear();
        let is_active = child.is_active;

        self.index.insert(child.id.clone(), handle);
        self.branches.push(child);
        self.branches[parent.0].children.push(handle);
        if is_active {
            self.set_active(handle);
        }
        handle
    }

    /// Record `child` as a child of `parent` as well, without moving it
    pub fn link_child(&mut self, parent: BranchId, child: BranchId) {
        let children = &mut self.branches[parent.0].children;
        if parent != child && !children.contains(&child) {
            children.push(child);
        }
    }

    /// Mark `handle` as the only active branch
    pub fn set_active(&mut self, handle: BranchId) {
        if let Some(previous) = self.active.replace(handle) {
            self.branches[previous.0].is_active = false;
        }
        self.branches[handle.0].is_active = true;
    }

    /// Attach working tree status to the active branch
    pub fn set_status(&mut self, status: Status) {
        if let Some(active) = self.active {
            self.branches[active.0].status = status;
        }
    }

    pub fn handle(&self, id: &str) -> Option<BranchId> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Branch> {
        self.handle(id).map(|handle| self.branch(handle))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn branch(&self, handle: BranchId) -> &Branch {
        &self.branches[handle.0]
    }

    pub(crate) fn branch_mut(&mut self, handle: BranchId) -> &mut Branch {
        &mut self.branches[handle.0]
    }

    pub fn root(&self) -> &Branch {
        self.branch(self.root)
    }

    pub fn root_handle(&self) -> BranchId {
        self.root
    }

    pub fn active(&self) -> Option<&Branch> {
        self.active.map(|handle| self.branch(handle))
    }

    /// All branches in discovery order, root first
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn children<'a>(&'a self, branch: &'a Branch) -> impl Iterator<Item = &'a Branch> + 'a {
        branch.children.iter().map(|&handle| self.branch(handle))
    }

    pub fn parent(&self, branch: &Branch) -> Option<&Branch> {
        branch.parent.map(|handle| self.branch(handle))
    }

    /// Children whose parent is `branch` (reconverged branches linked
    /// under several nodes are only yielded under their first discoverer)
    pub fn tree_children<'a>(
        &'a self,
        branch: &'a Branch,
    ) -> impl Iterator<Item = &'a Branch> + 'a {
        let handle = self.handle(&branch.id);
        self.children(branch)
            .filter(move |child| child.parent.is_some() && child.parent == handle)
    }

    /// Walk from `branch`'s parent up to the root
    pub fn ancestors<'a>(&'a self, branch: &'a Branch) -> impl Iterator<Item = &'a Branch> + 'a {
        std::iter::successors(self.parent(branch), move |current| self.parent(current))
    }

    /// Branch carrying `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.names.contains(name))
    }
}
