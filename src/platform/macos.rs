// ticketscope platform paths for macOS
// Config/Data: ~/Library/Application Support/ticketscope
// Chromium:    ~/Library/Application Support/Google/Chrome/Default/History

use std::env;
use std::path::PathBuf;

fn application_support() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
}

pub fn get_config_dir() -> PathBuf {
    application_support().join("ticketscope")
}

pub fn get_data_dir() -> PathBuf {
    application_support().join("ticketscope")
}

/// Default Chrome profile history database.
pub fn get_chromium_history_path() -> PathBuf {
    application_support()
        .join("Google")
        .join("Chrome")
        .join("Default")
        .join("History")
}
