//! Where csview keeps its files
//!
//! csview reads one settings file and writes one rolling log, both under a
//! per-user directory:
//! - `config.yaml`: reader defaults (`has_header`, `buffer_size`,
//!   `max_line_length`), written by `--save-config`
//! - `logs/csview.log.YYYY-MM-DD`: debug log of every run
//!
//! The directory is `$XDG_CONFIG_HOME/csview` or `~/.config/csview` on
//! Unix/macOS and `%APPDATA%\csview` on Windows. Nothing is created until a
//! file is actually written there.

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "csview";

/// Prefix of the daily log files in [`logs_dir`]
pub const LOG_FILE_PREFIX: &str = "csview.log";

/// Per-user csview directory, or `None` when no home or config dir is known
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        unix_config_dir(env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
    }
}

// An empty XDG_CONFIG_HOME counts as unset
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn unix_config_dir(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".config")))
        .map(|config| config.join(APP_DIR))
}

/// Settings file loaded on every run
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the log directory for the file appender
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
