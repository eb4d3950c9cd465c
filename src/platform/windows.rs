// ticketscope platform paths for Windows
// Config/Data: %APPDATA%/ticketscope
// Chromium:    %LOCALAPPDATA%/Google/Chrome/User Data/Default/History

use std::env;
use std::path::PathBuf;

fn roaming() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

fn local() -> PathBuf {
    PathBuf::from(
        env::var("LOCALAPPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local")),
    )
}

pub fn get_config_dir() -> PathBuf {
    roaming().join("ticketscope")
}

pub fn get_data_dir() -> PathBuf {
    roaming().join("ticketscope")
}

/// Default Chrome profile history database.
pub fn get_chromium_history_path() -> PathBuf {
    local()
        .join("Google")
        .join("Chrome")
        .join("User Data")
        .join("Default")
        .join("History")
}
