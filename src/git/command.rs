//! Git command execution
//!
//! Runs the `git` binary for history queries and for the side effects
//! the tree drives (checkout, pull, rebase, branch deletion).

use std::io::{BufRead, BufReader, Read, Split};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::{debug, info};

use crate::error::{Error, Result};
use super::log::{LOG_FORMAT, LogEntry};

/// Handle on the `git` executable for one repository
#[derive(Debug, Clone)]
pub struct Git {
    repo_path: PathBuf,
}

impl Git {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Start streaming the decorated history of HEAD and every local and
    /// remote branch, newest first
    pub fn log(&self) -> Result<LogStream> {
        let format = format!("--format={LOG_FORMAT}");
        let args = [
            "log",
            "--topo-order",
            "--decorate=short",
            format.as_str(),
            "HEAD",
            "--branches",
            "--remotes",
        ];
        debug!(?args, "spawning git");

        let mut child = Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| Error::CommandFailed {
            command: "git log".to_string(),
            stderr: "stdout was not captured".to_string(),
        })?;

        Ok(LogStream {
            lines: BufReader::new(stdout).split(b'\n'),
            child,
            done: false,
        })
    }

    pub fn checkout(&self, target: &str) -> Result<()> {
        info!(target, "checking out");
        self.run(&["checkout", target]).map(drop)
    }

    pub fn pull(&self) -> Result<()> {
        self.run(&["pull"]).map(drop)
    }

    /// Replay `branch` on top of `upstream`
    pub fn rebase(&self, branch: &str, upstream: &str) -> Result<()> {
        info!(branch, upstream, "rebasing");
        self.run(&["rebase", upstream, branch]).map(drop)
    }

    pub fn delete_branches(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        let mut args = vec!["branch", "-d"];
        args.extend(names.iter().map(String::as_str));
        self.run(&args).map(drop)
    }

    /// Run a git command to completion, returning its stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Lazily parsed `git log` output.
///
/// Dropping the stream before it is exhausted kills the child process,
/// so only the prefix of history actually consumed is ever produced.
pub struct LogStream {
    lines: Split<BufReader<ChildStdout>>,
    child: Child,
    done: bool,
}

impl LogStream {
    /// Reap the child once stdout is exhausted, surfacing a failed exit
    fn finish(&mut self) -> Option<Result<LogEntry>> {
        self.done = true;
        let status = match self.child.wait() {
            Ok(status) => status,
            Err(e) => return Some(Err(e.into())),
        };
        if status.success() {
            return None;
        }

        let mut stderr = String::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            // Best effort: the exit status is the error either way
            let _ = pipe.read_to_string(&mut stderr);
        }
        Some(Err(Error::CommandFailed {
            command: "git log".to_string(),
            stderr: stderr.trim().to_string(),
        }))
    }
}

impl Iterator for LogStream {
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next() {
                Some(Ok(bytes)) => {
                    let line = String::from_utf8_lossy(&bytes);
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(line.parse());
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => return self.finish(),
            }
        }
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        // The reader stopped early; nothing else wants this output
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
