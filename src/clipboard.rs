// src/clipboard.rs
use crate::error::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Pipes text into whichever clipboard tool is installed.
pub struct SystemClipboard {
    providers: Vec<(&'static str, Vec<&'static str>)>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        SystemClipboard {
            providers: vec![
                ("wl-copy", vec![]),
                ("pbcopy", vec![]),
                ("xclip", vec!["-selection", "clipboard"]),
                ("xsel", vec!["--clipboard", "--input"]),
            ],
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        SystemClipboard::new()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let Some((program, args)) = self
            .providers
            .iter()
            .find(|(program, _)| which::which(program).is_ok())
        else {
            return Err(Error::Clipboard("no clipboard tool found".to_string()));
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // stdin is dropped before waiting so the tool sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait()?;
        written?;
        if !status.success() {
            return Err(Error::Clipboard(format!("{} exited with {}", program, status)));
        }
        tracing::debug!(program, bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("clipboard rejected write".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_report_clipboard_error() {
        let mut clipboard = SystemClipboard {
            providers: vec![("notepages-no-such-clipboard-tool", vec![])],
        };
        assert!(matches!(clipboard.write_text("hi"), Err(Error::Clipboard(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_that_ignores_stdin_is_still_reaped() {
        // `true` exits without reading, so the write may hit a closed pipe
        let mut clipboard = SystemClipboard { providers: vec![("true", vec![])] };
        let big = "x".repeat(1 << 20);
        match clipboard.write_text(&big) {
            Ok(()) => {}
            Err(Error::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_memory_clipboard_failure() {
        let mut clipboard = MemoryClipboard { contents: None, fail: true };
        assert!(clipboard.write_text("hi").is_err());
        assert_eq!(clipboard.contents, None);
    }
}
