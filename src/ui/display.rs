//! User-facing output
//!
//! Rendered trees go to stdout; progress and failure messages go to
//! stderr with a severity prefix.

use std::fmt::Display as FmtDisplay;
use std::io::{self, IsTerminal, Write};

use super::Styles;

/// Severity of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Info,
    Warning,
    Error,
}

impl Message {
    pub fn prefix(self) -> &'static str {
        match self {
            Message::Info => "INFO",
            Message::Warning => "WARN",
            Message::Error => "ERR (!)",
        }
    }
}

/// Terminal printer
pub struct Display {
    styles: Styles,
}

impl Display {
    /// Colors are only used when requested and stdout is a terminal
    pub fn new(color: bool) -> Self {
        let styles = if color && io::stdout().is_terminal() {
            Styles::new()
        } else {
            Styles::plain()
        };
        Self { styles }
    }

    pub fn message(&self, kind: Message, text: impl FmtDisplay) {
        let style = match kind {
            Message::Info => self.styles.info,
            Message::Warning => self.styles.warning,
            Message::Error => self.styles.error,
        };
        eprintln!("[ {} ] {}", style.apply(kind.prefix()), text);
    }

    pub fn info(&self, text: impl FmtDisplay) {
        self.message(Message::Info, text);
    }

    pub fn warn(&self, text: impl FmtDisplay) {
        self.message(Message::Warning, text);
    }

    pub fn error(&self, text: impl FmtDisplay) {
        self.message(Message::Error, text);
    }

    /// Print rendered tree lines followed by a blank line
    pub fn render(&self, lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in lines {
            writeln!(out, "{}", self.styles.paint(line))?;
        }
        writeln!(out)?;
        out.flush()
    }
}
