//! Configuration
//!
//! Optional YAML file in the platform config directory
//! (`~/.config/branchtree/config.yaml` on Linux). Every field has a
//! default, so a missing file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote whose branches are tracked with `track_all_remotes`
    pub remote: String,
    /// List commits under every branch
    pub show_commits: bool,
    /// Colorize output when writing to a terminal
    pub color: bool,
    /// Truncate commit messages to this many columns
    pub max_message_width: Option<usize>,
    /// Track every branch of `remote`, not only upstreams of local branches
    pub track_all_remotes: bool,
    /// Names `wipe` never deletes; preferred as the surviving alias
    pub protected: Vec<String>,
    /// Default tracing filter when `BRANCHTREE_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            show_commits: false,
            color: true,
            max_message_width: None,
            track_all_remotes: false,
            protected: vec!["main".to_string(), "master".to_string()],
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "branchtree").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config. An explicit path must exist; the default path
    /// is only read when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(&path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
