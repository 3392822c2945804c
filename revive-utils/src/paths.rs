//! Path utilities for revive
//!
//! Known-folder lookup (the user's documents directory, where input
//! scripts live) and the state/log directories used by file logging.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

/// Application identifier for platform directories
const APP_NAME: &str = "revive";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the user's documents directory
///
/// Returns `None` when the platform cannot provide one (no home
/// directory, or no documents folder configured).
pub fn documents_dir() -> Option<PathBuf> {
    UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
}

/// Get the state directory
///
/// Location: `$XDG_STATE_HOME/revive` or `~/.local/state/revive`
pub fn state_dir() -> PathBuf {
    project_dirs()
        .and_then(|p| p.state_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(fallback_state_dir)
}

/// Get the log directory
///
/// Location: `$XDG_STATE_HOME/revive/log`
pub fn log_dir() -> PathBuf {
    state_dir().join("log")
}

/// Check that `path` names an existing regular file
///
/// Directories and unreadable entries count as absent.
pub fn is_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

// Fallback when ProjectDirs is unavailable

fn fallback_state_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir());
    home.join(".local").join("state").join(APP_NAME)
}
