//! Location of the UI configuration files (`theme.conf`, `keybinds.conf`)
//! and the log file.

use std::path::PathBuf;

pub const APP_DIR: &str = "userdash";
pub const DEFAULT_API_URL: &str = "https://forty4-backend.onrender.com/api";

/// `$XDG_CONFIG_HOME/userdash`, else `$HOME/.config/userdash`.
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|h| PathBuf::from(h).join(".config"))
        })?;
    Some(base.join(APP_DIR))
}

/// Where `name` should be written; creates the config directory. Falls back
/// to the working directory when no config home can be determined.
pub fn config_file_write_path(name: &str) -> PathBuf {
    match config_dir() {
        Some(dir) if std::fs::create_dir_all(&dir).is_ok() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

pub fn default_log_path() -> PathBuf {
    config_file_write_path("userdash.log")
}
