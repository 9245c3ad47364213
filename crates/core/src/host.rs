//! Commands sent back to the browser.
//!
//! A qutebrowser userscript talks to the browser by writing commands, one per
//! line, to the FIFO named in `QUTE_FIFO`. Only the handful of commands the
//! reader view needs are modelled here.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::{QuteReaderError, Result};

/// A single browser command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// `open [-t] [-r] <target>`
    Open { target: String, new_tab: bool, related: bool },
    /// `message-error <text>`
    MessageError(String),
    /// `message-info <text>`
    MessageInfo(String),
}

impl HostCommand {
    /// Opens `target` in a new tab next to the current one.
    pub fn open_tab(target: impl Into<String>) -> Self {
        Self::Open { target: target.into(), new_tab: true, related: true }
    }

    /// The command as qutebrowser parses it.
    ///
    /// `open` and `message-*` take the rest of the line as a single argument
    /// without unquoting it, so the argument is written raw.
    pub fn to_command_line(&self) -> String {
        match self {
            Self::Open { target, new_tab, related } => {
                let mut line = String::from("open");
                if *new_tab {
                    line.push_str(" -t");
                }
                if *related {
                    line.push_str(" -r");
                }
                line.push(' ');
                line.push_str(&target.replace(['\n', '\r'], ""));
                line
            }
            Self::MessageError(text) => format!("message-error {}", single_line(text)),
            Self::MessageInfo(text) => format!("message-info {}", single_line(text)),
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}

/// Commands are newline-delimited, so a message must fit on one line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The browser side of the command interface.
pub trait Host {
    fn send(&self, command: &HostCommand) -> Result<()>;
}

/// Writes commands to qutebrowser's userscript FIFO.
#[derive(Debug, Clone)]
pub struct FifoHost {
    path: PathBuf,
}

impl FifoHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Host for FifoHost {
    fn send(&self, command: &HostCommand) -> Result<()> {
        let line = command.to_command_line();
        tracing::debug!(fifo = %self.path.display(), command = %line, "sending host command");

        let mut fifo = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| QuteReaderError::HostError(format!("{}: {}", self.path.display(), e)))?;

        writeln!(fifo, "{}", line).map_err(|e| QuteReaderError::HostError(e.to_string()))
    }
}

/// Prints commands to stdout, for use outside the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutHost;

impl Host for StdoutHost {
    fn send(&self, command: &HostCommand) -> Result<()> {
        println!("{}", command);
        Ok(())
    }
}

/// Keeps every command in memory.
#[derive(Debug, Default)]
pub struct RecordingHost {
    commands: Mutex<Vec<HostCommand>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands sent so far, oldest first.
    pub fn commands(&self) -> Vec<HostCommand> {
        self.commands.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Host for RecordingHost {
    fn send(&self, command: &HostCommand) -> Result<()> {
        self.commands
            .lock()
            .map_err(|e| QuteReaderError::HostError(e.to_string()))?
            .push(command.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_tab_command_line() {
        let cmd = HostCommand::open_tab("/home/user/.local/share/qutebrowser/userscripts/readability.html");
        assert_eq!(
            cmd.to_command_line(),
            "open -t -r /home/user/.local/share/qutebrowser/userscripts/readability.html"
        );
    }

    #[test]
    fn test_open_plain() {
        let cmd = HostCommand::Open { target: "https://example.com".to_string(), new_tab: false, related: false };
        assert_eq!(cmd.to_command_line(), "open https://example.com");
    }

    #[test]
    fn test_open_keeps_path_with_spaces_raw() {
        let cmd = HostCommand::open_tab("/Users/me/Library/Application Support/qutebrowser/userscripts/readability.html");
        assert_eq!(
            cmd.to_command_line(),
            "open -t -r /Users/me/Library/Application Support/qutebrowser/userscripts/readability.html"
        );
    }

    #[test]
    fn test_open_strips_newlines() {
        let cmd = HostCommand::open_tab("/tmp/read\nability.html\r");
        assert_eq!(cmd.to_command_line(), "open -t -r /tmp/readability.html");
    }

    #[test]
    fn test_message_error_raw_and_single_line() {
        let cmd = HostCommand::MessageError("File not found:\n\"/tmp/x\"".to_string());
        assert_eq!(cmd.to_command_line(), r#"message-error File not found: "/tmp/x""#);
    }

    #[test]
    fn test_message_info() {
        assert_eq!(HostCommand::MessageInfo("done".to_string()).to_string(), "message-info done");
    }

    #[test]
    fn test_fifo_host_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fifo");
        std::fs::write(&path, "").unwrap();

        let host = FifoHost::new(&path);
        host.send(&HostCommand::MessageInfo("one".to_string())).unwrap();
        host.send(&HostCommand::open_tab("/tmp/readability.html")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "message-info one\nopen -t -r /tmp/readability.html\n"
        );
    }

    #[test]
    fn test_fifo_host_missing_fifo() {
        let host = FifoHost::new("/nonexistent/qutebrowser/fifo");
        let result = host.send(&HostCommand::MessageInfo("x".to_string()));
        assert!(matches!(result, Err(QuteReaderError::HostError(_))));
    }

    #[test]
    fn test_recording_host() {
        let host = RecordingHost::new();
        host.send(&HostCommand::MessageError("boom".to_string())).unwrap();
        assert_eq!(host.commands(), vec![HostCommand::MessageError("boom".to_string())]);
    }
}
