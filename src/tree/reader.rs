//! History reader
//!
//! Folds a newest-first stream of log entries into a forward adjacency
//! map and an index of branch tips, stopping at the first commit that
//! is an ancestor of every tracked tip and of HEAD.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::git::LogEntry;
use super::commit::Commit;

/// Everything the builder needs to know about the consumed history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeData {
    /// Parent hash -> child hashes, in the order the children were read
    pub adjacency: HashMap<String, Vec<String>>,
    /// Tip commit -> branch names first seen at that commit
    pub branch_tips: HashMap<String, BTreeSet<String>>,
    /// Commit details (only filled when requested)
    pub commits: HashMap<String, Commit>,
    /// The checked-out commit
    pub head: Option<String>,
    /// Common ancestor of all tips and HEAD
    pub root: String,
    /// Number of log entries consumed
    pub consumed: usize,
}

impl TreeData {
    /// Forward children of a commit
    pub fn children(&self, commit: &str) -> &[String] {
        self.adjacency.get(commit).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether every target is reachable from `from` (reflexively)
    /// following the forward adjacency
    pub fn reaches_all<'a>(&self, from: &str, targets: impl IntoIterator<Item = &'a str>) -> bool {
        let mut pending: HashSet<&str> = targets.into_iter().collect();
        let mut seen = HashSet::new();
        let mut stack = vec![from];

        while let Some(commit) = stack.pop() {
            if pending.is_empty() {
                break;
            }
            if !seen.insert(commit) {
                continue;
            }
            pending.remove(commit);
            stack.extend(self.children(commit).iter().map(String::as_str));
        }

        pending.is_empty()
    }
}

/// Reads log entries into [`TreeData`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeReader {
    include_commits: bool,
}

impl TreeReader {
    /// `include_commits` keeps the hash, parents and subject of every
    /// consumed entry so branches can list their commits
    pub fn new(include_commits: bool) -> Self {
        Self { include_commits }
    }

    /// Consume `entries` (newest first) until the root is known.
    ///
    /// `head` is the checked-out commit; when `None`, an entry flagged as
    /// HEAD by its decorations is used instead. Entries older than the
    /// root are never pulled from the iterator.
    pub fn read<I>(&self, head: Option<&str>, tracked: &[String], entries: I) -> Result<TreeData>
    where
        I: IntoIterator<Item = Result<LogEntry>>,
    {
        let mut state = ReadState {
            data: TreeData::default(),
            unresolved: tracked.iter().map(String::as_str).collect(),
            expected_head: head,
            include_commits: self.include_commits,
        };

        for entry in entries {
            let entry = entry?;
            if let Some(root) = state.absorb(entry) {
                debug!(root = %root, consumed = state.data.consumed, "found common ancestor");
                state.data.root = root;
                return Ok(state.data);
            }
        }

        // Report the alphabetically first missing name so failures are stable
        let missing = state.unresolved.iter().min().map(|name| name.to_string());
        match missing {
            Some(name) => Err(Error::UnresolvedBranch { name }),
            None => Err(Error::AmbiguousRoot {
                consumed: state.data.consumed,
            }),
        }
    }
}

/// Accumulator threaded through the entry stream
struct ReadState<'a> {
    data: TreeData,
    unresolved: HashSet<&'a str>,
    expected_head: Option<&'a str>,
    include_commits: bool,
}

impl ReadState<'_> {
    /// Fold one entry in; returns the root once it has been found
    fn absorb(&mut self, entry: LogEntry) -> Option<String> {
        self.data.consumed += 1;
        trace!(commit = %entry.commit, "reading entry");

        for parent in &entry.parents {
            self.data
                .adjacency
                .entry(parent.clone())
                .or_default()
                .push(entry.commit.clone());
        }

        if self.expected_head == Some(entry.commit.as_str())
            || (entry.is_head && self.data.head.is_none())
        {
            self.data.head = Some(entry.commit.clone());
        }

        let resolved: BTreeSet<String> = entry
            .branches
            .iter()
            .filter(|name| self.unresolved.contains(name.as_str()))
            .cloned()
            .collect();
        if !resolved.is_empty() {
            self.unresolved.retain(|name| !resolved.contains(*name));
            self.data.branch_tips.insert(entry.commit.clone(), resolved);
        }

        if self.include_commits {
            self.data.commits.insert(entry.commit.clone(), entry.to_commit());
        }

        if self.is_root(&entry.commit) {
            Some(entry.commit)
        } else {
            None
        }
    }

    fn head_known(&self) -> bool {
        match self.expected_head {
            Some(head) => self.data.head.as_deref() == Some(head),
            None => true,
        }
    }

    fn is_root(&self, commit: &str) -> bool {
        if !self.unresolved.is_empty() || !self.head_known() {
            return false;
        }
        let targets = self
            .data
            .branch_tips
            .keys()
            .map(String::as_str)
            .chain(self.data.head.as_deref());
        self.data.reaches_all(commit, targets)
    }
}
