//! UI module
//!
//! Contains all terminal output components:
//! - Styles for consistent theming
//! - Tree rendering
//! - Message and tree printing

mod display;
pub mod renderer;
mod styles;

pub use display::{Display, Message};
pub use renderer::{RenderOptions, render, render_with, truncate};
pub use styles::Styles;
