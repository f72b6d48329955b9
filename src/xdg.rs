//! XDG Base Directory support for hookreload
//!
//! Follows the XDG Base Directory Specification:
//! - https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html
//!
//! Directory structure:
//! - `$XDG_STATE_HOME/hookreload/` (default: `~/.local/state/hookreload/`) - Reload records
//! - `$XDG_CONFIG_HOME/hookreload/` (default: `~/.config/hookreload/`) - Global configuration

use std::path::PathBuf;

/// Get the hookreload state directory
///
/// Respects XDG_STATE_HOME environment variable.
/// Falls back to `$HOME/.local/state/hookreload` on Unix, or appropriate path on other platforms.
pub fn state_dir() -> PathBuf {
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        PathBuf::from(xdg_state).join("hookreload")
    } else if let Some(home) = dirs::home_dir() {
        // XDG spec default: $HOME/.local/state
        home.join(".local").join("state").join("hookreload")
    } else {
        PathBuf::from(".hookreload-state")
    }
}

/// Get the hookreload configuration directory
///
/// Respects XDG_CONFIG_HOME environment variable.
/// Falls back to `$HOME/.config/hookreload`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg_config).join("hookreload"))
    } else {
        dirs::home_dir().map(|home| home.join(".config").join("hookreload"))
    }
}

/// Directory holding one reload record per target directory
pub fn reload_records_dir() -> PathBuf {
    state_dir().join("reloads")
}
