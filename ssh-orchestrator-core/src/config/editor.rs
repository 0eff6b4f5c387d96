//! Opens a config file in an editor of the user's choosing

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// How the user wants config files opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Hand the file to the desktop environment's text editor
    System,
    /// Run a terminal editor in the current terminal and wait for it
    Terminal,
}

/// Open `path` in an editor and wait for it to close.
pub fn open_editor(path: &Path, mode: EditorMode) -> CoreResult<()> {
    debug!("[EDITOR] Opening {} ({mode:?})", path.display());
    match mode {
        EditorMode::System => {
            let mut cmd = system_editor_command(path)?;
            run_editor(&mut cmd)
        }
        EditorMode::Terminal => {
            let editor = resolve_terminal_editor()?;
            run_editor(Command::new(editor).arg(path))
        }
    }
}

fn system_editor_command(path: &Path) -> CoreResult<Command> {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg("-t").arg(path);
        Ok(cmd)
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "notepad"]).arg(path);
        Ok(cmd)
    } else if cfg!(target_os = "linux") {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        Ok(cmd)
    } else {
        Err(CoreError::UnsupportedPlatform(
            "no system editor handler for this OS".to_string(),
        ))
    }
}

/// `$EDITOR` when resolvable, otherwise the first of vim/nano on PATH.
fn resolve_terminal_editor() -> CoreResult<PathBuf> {
    if let Ok(editor) = std::env::var("EDITOR") {
        if !editor.is_empty() {
            match which::which(&editor) {
                Ok(found) => return Ok(found),
                Err(_) => warn!("[EDITOR] $EDITOR '{editor}' not found in PATH, falling back"),
            }
        }
    }
    for candidate in ["vim", "nano"] {
        if let Ok(found) = which::which(candidate) {
            return Ok(found);
        }
    }
    Err(CoreError::EditorNotFound)
}

fn run_editor(cmd: &mut Command) -> CoreResult<()> {
    let status = cmd
        .status()
        .map_err(|e| CoreError::LaunchFailed(format!("editor: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(CoreError::LaunchFailed(format!(
            "editor exited with {status}"
        )))
    }
}
