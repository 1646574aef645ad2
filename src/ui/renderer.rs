//! Branch tree rendering
//!
//! Lays the tree out depth first with box-drawing connectors. Children
//! are drawn above their parent so tips end up at the top and the root
//! at the bottom:
//!
//! ```text
//!   ╭○  [branch1]
//!   ├○  [branch2]
//! ╭●╯ [master]
//! ```

use unicode_width::UnicodeWidthChar;

use crate::tree::{Branch, Tree};

/// Rendering switches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit one line per commit under each branch
    pub commits: bool,
    /// Truncate commit messages to this many display columns
    pub max_message_width: Option<usize>,
}

/// Render `tree`, optionally listing the commits of every branch
pub fn render(tree: &Tree, include_commits: bool) -> Vec<String> {
    let options = RenderOptions {
        commits: include_commits,
        ..RenderOptions::default()
    };
    render_with(tree, &options)
}

pub fn render_with(tree: &Tree, options: &RenderOptions) -> Vec<String> {
    let mut canvas = Vec::new();
    render_branch(tree, tree.root(), "", true, options, &mut canvas);
    canvas
}

fn render_branch(
    tree: &Tree,
    branch: &Branch,
    indent: &str,
    first: bool,
    options: &RenderOptions,
    canvas: &mut Vec<String>,
) {
    let child_indent = format!("{indent}{}", if first { "  " } else { "│ " });
    for (i, child) in tree.children(branch).enumerate() {
        render_branch(tree, child, &child_indent, i == 0, options, canvas);
    }

    let corner = if first { '╭' } else { '├' };
    let bullet = if branch.is_active { '●' } else { '○' };
    let close = if branch.has_children() { '╯' } else { ' ' };
    canvas.push(format!("{indent}{corner}{bullet}{close} [{}]", branch.display_name()));

    let status = branch.status;
    let flags = [
        (status.staged, "+ staged changes"),
        (status.unstaged, "~ unstaged changes"),
        (status.untracked, "? untracked files"),
    ];
    for (_, label) in flags.iter().filter(|(set, _)| *set) {
        canvas.push(format!("{indent}│   {label}"));
    }

    if options.commits {
        for commit in &branch.commits {
            let message = match options.max_message_width {
                Some(width) => truncate(&commit.message, width),
                None => commit.message.clone(),
            };
            canvas.push(format!("{indent}│   ‣ {} {message}", commit.short_id()));
        }
    }
}

/// Cut `text` to at most `width` display columns, marking the cut with `...`.
/// Below three columns only as many dots as fit are kept.
pub fn truncate(text: &str, width: usize) -> String {
    const ELLIPSIS: &str = "...";

    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }

    let ellipsis = &ELLIPSIS[..ELLIPSIS.len().min(width)];
    let budget = width - ellipsis.len();
    let mut used = 0;
    let mut result = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push_str(ellipsis);
    result
}
