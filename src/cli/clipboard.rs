//! Clipboard hand-off.
//!
//! Pipes a value into the first system clipboard tool found on `PATH`.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Clipboard tools in order of preference, with their arguments.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Copy `value` to the clipboard. Returns the tool used.
///
/// # Errors
///
/// Returns an error if no clipboard tool is installed or the tool fails.
pub fn copy(value: &str) -> Result<&'static str> {
    let &(tool, args) = TOOLS
        .iter()
        .find(|(tool, _)| which::which(tool).is_ok())
        .ok_or_else(|| {
            Error::Other(
                "no clipboard tool found. Install one of: pbcopy, wl-copy, xclip, xsel".to_string(),
            )
        })?;
    debug!(tool, "copying to clipboard");

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Other(format!("failed to run {}: {}", tool, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(value.as_bytes())
            .map_err(|e| Error::Other(format!("failed to write to {}: {}", tool, e)))?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(Error::Other(format!("{} exited with {}", tool, status)));
    }
    Ok(tool)
}
