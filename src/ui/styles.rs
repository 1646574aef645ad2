//! UI styles
//!
//! Terminal colors for rendered tree lines and user messages.

use crossterm::style::{ContentStyle, Stylize};

/// Color palette
pub mod colors {
    use crossterm::style::Color;

    // Tree connectors
    pub const CONNECTOR: Color = Color::DarkGrey;

    // Branch labels
    pub const ACTIVE: Color = Color::Green;
    pub const BRANCH: Color = Color::Cyan;

    // Commit lines
    pub const COMMIT_ID: Color = Color::Yellow;

    // Working tree status
    pub const STATUS: Color = Color::Red;

    // Message prefixes
    pub const INFO: Color = Color::Blue;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
}

/// Collection of styles used for terminal output
#[derive(Debug, Clone)]
pub struct Styles {
    pub connector: ContentStyle,
    pub active: ContentStyle,
    pub branch: ContentStyle,
    pub commit_id: ContentStyle,
    pub status: ContentStyle,
    pub info: ContentStyle,
    pub warning: ContentStyle,
    pub error: ContentStyle,
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}

impl Styles {
    pub fn new() -> Self {
        Self {
            connector: ContentStyle::new().with(colors::CONNECTOR),
            active: ContentStyle::new().with(colors::ACTIVE).bold(),
            branch: ContentStyle::new().with(colors::BRANCH),
            commit_id: ContentStyle::new().with(colors::COMMIT_ID),
            status: ContentStyle::new().with(colors::STATUS),
            info: ContentStyle::new().with(colors::INFO).bold(),
            warning: ContentStyle::new().with(colors::WARNING).bold(),
            error: ContentStyle::new().with(colors::ERROR).bold(),
        }
    }

    /// Styles that leave text untouched
    pub fn plain() -> Self {
        let plain = ContentStyle::new();
        Self {
            connector: plain,
            active: plain,
            branch: plain,
            commit_id: plain,
            status: plain,
            info: plain,
            warning: plain,
            error: plain,
        }
    }

    /// Colorize one line produced by the renderer
    pub fn paint(&self, line: &str) -> String {
        if let Some((prefix, rest)) = line.split_once("‣ ") {
            let (id, message) = rest.split_once(' ').unwrap_or((rest, ""));
            return format!(
                "{}{} {}",
                self.connector.apply(format!("{prefix}‣ ")),
                self.commit_id.apply(id),
                message
            );
        }

        if let Some(start) = line.find('[') {
            let (prefix, label) = line.split_at(start);
            let label_style = if prefix.contains('●') { self.active } else { self.branch };
            return format!("{}{}", self.connector.apply(prefix), label_style.apply(label));
        }

        // Status lines: connector prefix followed by a marker and label
        match line.rfind('│') {
            Some(end) => {
                let (prefix, label) = line.split_at(end + '│'.len_utf8());
                format!("{}{}", self.connector.apply(prefix), self.status.apply(label))
            }
            None => line.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_styles_leave_lines_unchanged() {
        let styles = Styles::plain();
        let lines = [
            "  ╭○  [branch1]",
            "╭●╯ [master]",
            "│   ‣ 0000001 Commit 1",
            "  │   + staged changes",
        ];
        for line in lines {
            assert_eq!(styles.paint(line), line);
        }
    }

    #[test]
    fn test_paint_keeps_text() {
        let painted = Styles::new().paint("╭●╯ [master]");
        assert!(painted.contains("[master]"));
        assert!(painted.contains('●'));
    }
}
