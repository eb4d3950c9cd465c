// ticketscope platform paths for Linux
// Config:   $XDG_CONFIG_HOME/ticketscope or ~/.config/ticketscope
// Data:     $XDG_DATA_HOME/ticketscope or ~/.local/share/ticketscope
// Chromium: ~/.config/google-chrome/Default/History

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "ticketscope";

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join(APP_DIR),
    }
}

pub fn get_config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

pub fn get_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

/// Default Chrome profile history database.
pub fn get_chromium_history_path() -> PathBuf {
    let config = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().join(".config"),
    };
    config.join("google-chrome").join("Default").join("History")
}
