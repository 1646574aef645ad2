//! Git log entry parsing
//!
//! Each history line produced with [`LOG_FORMAT`] looks like
//! `[C:<hash>][P:<parents>][R:<decorations>][M:<subject>]`.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tree::Commit;

/// Pretty format passed to `git log --format`
pub const LOG_FORMAT: &str = "[C:%H][P:%P][R:%D][M:%s]";

/// A single ref decoration attached to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// `tag: <name>`
    Tag(String),
    /// `HEAD -> <name>`: the checked-out branch
    Head(String),
    /// Bare `HEAD`: a detached checkout
    DetachedHead,
    /// Any other ref name, local or remote
    Branch(String),
}

impl Decoration {
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let decoration = if let Some(tag) = token.strip_prefix("tag: ") {
            Decoration::Tag(tag.trim().to_string())
        } else if let Some(name) = token.strip_prefix("HEAD -> ") {
            Decoration::Head(name.trim().to_string())
        } else if token == "HEAD" {
            Decoration::DetachedHead
        } else {
            Decoration::Branch(token.to_string())
        };
        Some(decoration)
    }

    /// Branch name contributed by this decoration, if any
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Decoration::Head(name) | Decoration::Branch(name) => Some(name),
            Decoration::Tag(_) | Decoration::DetachedHead => None,
        }
    }

    pub fn marks_head(&self) -> bool {
        matches!(self, Decoration::Head(_) | Decoration::DetachedHead)
    }
}

/// Split a `%D` decoration list into tokens
pub fn decorations(list: &str) -> impl Iterator<Item = Decoration> + '_ {
    list.split(',').filter_map(Decoration::parse)
}

/// One parsed line of history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub commit: String,
    pub parents: Vec<String>,
    /// Branch names decorating this commit (tags excluded)
    pub branches: BTreeSet<String>,
    pub message: String,
    /// Whether HEAD points at this commit
    pub is_head: bool,
}

impl LogEntry {
    pub fn new(commit: &str, parents: &[&str], branches: &[&str], message: &str) -> Self {
        Self {
            commit: commit.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            branches: branches.iter().map(|b| b.to_string()).collect(),
            message: message.to_string(),
            is_head: false,
        }
    }

    pub fn head(mut self) -> Self {
        self.is_head = true;
        self
    }

    pub fn to_commit(&self) -> Commit {
        Commit::new(self.commit.clone(), self.parents.clone(), self.message.clone())
    }
}

impl FromStr for LogEntry {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let malformed = || Error::MalformedEntry {
            line: line.to_string(),
        };
        let trimmed = line.trim_end_matches(['\r', '\n']);

        let rest = trimmed.strip_prefix("[C:").ok_or_else(malformed)?;
        let (commit, rest) = rest.split_once("][P:").ok_or_else(malformed)?;
        let (parents, rest) = rest.split_once("][R:").ok_or_else(malformed)?;
        let (refs, rest) = rest.split_once("][M:").ok_or_else(malformed)?;
        let message = rest.strip_suffix(']').ok_or_else(malformed)?;

        let commit = commit.trim();
        if commit.is_empty() || commit.contains(char::is_whitespace) {
            return Err(malformed());
        }

        let mut branches = BTreeSet::new();
        let mut is_head = false;
        for decoration in decorations(refs) {
            is_head |= decoration.marks_head();
            if let Some(name) = decoration.branch_name() {
                branches.insert(name.to_string());
            }
        }

        Ok(Self {
            commit: commit.to_string(),
            parents: parents.split_whitespace().map(str::to_string).collect(),
            branches,
            message: message.to_string(),
            is_head,
        })
    }
}
