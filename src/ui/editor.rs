use crate::error::{ReleaseNotesError, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;
use tracing::debug;

const FALLBACK_EDITOR: &str = "vi";

/// The user's editor command: `$VISUAL`, then `$EDITOR`, then `vi`
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|cmd| !cmd.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// Let the user amend `text` in their editor and return the result
pub fn edit_text(text: &str) -> Result<String> {
    edit_with(&editor_command(), text)
}

/// Open `text` in a temporary markdown file with `command` and read it back.
///
/// `command` may carry arguments, e.g. `code --wait`. The file path is
/// appended as the last argument.
///
/// # Returns
/// * `Ok(String)` - File contents after the editor exits
/// * `Err` - If the editor cannot be started or exits with a failure status
pub fn edit_with(command: &str, text: &str) -> Result<String> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ReleaseNotesError::editor("Editor command is empty"))?;

    let mut file = tempfile::Builder::new()
        .prefix("release-notes-")
        .suffix(".md")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    debug!(editor = command, path = %file.path().display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| ReleaseNotesError::editor(format!("Failed to start '{}': {}", program, e)))?;

    if !status.success() {
        return Err(ReleaseNotesError::editor(format!(
            "'{}' exited with code {}",
            command,
            status.code().unwrap_or(-1)
        )));
    }

    Ok(fs::read_to_string(file.path())?)
}
