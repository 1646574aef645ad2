//! Main application driver
//!
//! Builds the branch tree for the repository and runs the selected
//! action: print the tree, pull and rebase, or wipe alias branches.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use branchtree::Error;
use branchtree::config::Config;
use branchtree::git::{self, Git, Refs};
use branchtree::ops::{RebaseStep, alias_plan, rebase_plan};
use branchtree::tree::{Tree, short_id};
use branchtree::ui::{Display, RenderOptions, render_with};

/// What to do with the tree once it is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print the tree
    Show,
    /// Pull the root branch and rebase every local branch onto its parent
    Pull { wipe: bool },
    /// Delete alias branches
    Wipe,
}

/// A freshly built tree together with the refs it was built from
struct Snapshot {
    tree: Tree,
    refs: Refs,
    remote_names: HashSet<String>,
}

/// Main application state
pub struct App {
    // Repository
    repo_path: PathBuf,
    git: Git,

    // Options
    config: Config,
    render_options: RenderOptions,

    display: Display,
}

impl App {
    /// Create a new App instance
    pub fn new(repo_path: PathBuf, config: Config, display: Display) -> Self {
        let render_options = RenderOptions {
            commits: config.show_commits,
            max_message_width: config.max_message_width,
        };

        Self {
            git: Git::new(&repo_path),
            repo_path,
            config,
            render_options,
            display,
        }
    }

    pub fn run(&self, action: Action) -> Result<()> {
        match action {
            Action::Show => {
                let snapshot = self.detect_tree()?;
                self.render(&snapshot.tree)
            }
            Action::Pull { wipe } => {
                let snapshot = self.detect_tree()?;
                self.render(&snapshot.tree)?;
                self.pull_remotes(&snapshot)?;
                if wipe {
                    let snapshot = self.detect_tree()?;
                    self.wipe(&snapshot)?;
                }
                Ok(())
            }
            Action::Wipe => {
                let snapshot = self.detect_tree()?;
                self.wipe(&snapshot)
            }
        }
    }

    /// Build the tree from the current repository state
    fn detect_tree(&self) -> Result<Snapshot> {
        let refs =
            git::read_refs(&self.repo_path).context("Failed to discover git repository")?;
        let tracking = refs.tracking(&self.config.remote, self.config.track_all_remotes);
        debug!(tracked = ?tracking.names, head = %refs.head, "reading history");

        let stream = self.git.log()?;
        let mut tree = Tree::from_history(
            Some(&refs.head),
            &tracking.names,
            &tracking.remote,
            stream,
            self.render_options.commits,
        )?;
        tree.set_status(git::working_tree_status(&self.repo_path)?);
        info!(
            branches = tree.len(),
            root = %tree.root().display_name(),
            "detected branch tree"
        );

        Ok(Snapshot {
            tree,
            refs,
            remote_names: tracking.remote,
        })
    }

    fn render(&self, tree: &Tree) -> Result<()> {
        self.display.render(&render_with(tree, &self.render_options))?;
        Ok(())
    }

    fn pull_remotes(&self, snapshot: &Snapshot) -> Result<()> {
        let Snapshot {
            tree,
            refs,
            remote_names,
        } = snapshot;

        let status = tree.active().map(|branch| branch.status).unwrap_or_default();
        if status.has_changes() {
            return Err(Error::DirtyWorkingTree.into());
        }

        let root = tree.root();
        let root_name = root.names.iter().find(|name| !remote_names.contains(*name));
        match root_name {
            Some(name) => {
                self.display.info(format!("Checking out to {name}"));
                self.git.checkout(name)?;
                self.display.info(format!("Pulling remote {name} ..."));
                self.git.pull()?;
            }
            None => self.display.warn(format!(
                "Root {} has no local branch; skipping pull",
                root.display_name()
            )),
        }

        self.display.info("Rebasing child branches ...");
        for step in rebase_plan(tree, remote_names) {
            let RebaseStep { branch, onto } = &step;
            self.display.info(format!("  Rebasing '{branch}' over '{onto}' ..."));
            self.git.rebase(branch, onto).with_context(|| {
                format!("Rebase of '{branch}' onto '{onto}' failed; resolve it manually")
            })?;
        }

        self.restore_head(refs)
    }

    fn wipe(&self, snapshot: &Snapshot) -> Result<()> {
        let Snapshot {
            tree,
            refs,
            remote_names,
        } = snapshot;

        self.display.info("Collecting alias branches ...");
        let plan = alias_plan(
            tree,
            remote_names,
            &self.config.protected,
            |name| refs.has_upstream(name),
            refs.head_branch.as_deref(),
        );
        if plan.is_empty() {
            self.display.info("No alias branches found.");
            return Ok(());
        }

        for group in &plan {
            self.display.info(format!(
                "Deleting: {} (kept '{}' at {}) ...",
                group.aliases.join(", "),
                group.keeper,
                short_id(&group.commit)
            ));
            self.git.delete_branches(&group.aliases)?;
        }

        self.display.info("Success.");
        self.restore_head(refs)
    }

    /// Check the originally checked-out branch or commit back out
    fn restore_head(&self, refs: &Refs) -> Result<()> {
        let target = refs.head_branch.as_deref().unwrap_or(&refs.head);
        self.git.checkout(target)?;
        Ok(())
    }
}
