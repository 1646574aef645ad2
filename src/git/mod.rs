//! Git operations module
//!
//! Provides functionality for interacting with git repositories:
//! - Log entry parsing and lazy history streaming
//! - HEAD and branch discovery
//! - Working tree status
//! - Checkout, pull, rebase and branch deletion

mod command;
mod log;
mod refs;
mod status;

pub use command::{Git, LogStream};
pub use log::{Decoration, LOG_FORMAT, LogEntry, decorations};
pub use refs::{Refs, Tracking, read_refs};
pub use status::working_tree_status;
