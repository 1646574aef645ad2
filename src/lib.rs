//! branchtree - branch tree viewer for git repositories
//!
//! Reconstructs how local and remote branches diverge from a shared
//! history and renders the result as a box-drawing diagram:
//!
//! ```text
//!   ╭○  [feature]
//!   ├●  [fixes]
//! ╭○╯ [master]
//! ```
//!
//! The pipeline is: `git log` stream -> [`git::LogEntry`] ->
//! [`tree::TreeReader`] -> [`tree::build_tree`] -> [`tree::Tree`] ->
//! [`ui::render`].

pub mod config;
pub mod error;
pub mod git;
pub mod ops;
pub mod tree;
pub mod ui;

pub use error::{Error, Result};
