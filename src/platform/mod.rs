// ticketscope platform abstraction
// Platform-specific locations for settings, the local history database and
// the default Chromium profile, selected with `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as imp;

#[cfg(target_os = "macos")]
use macos as imp;

#[cfg(target_os = "windows")]
use windows as imp;

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    imp::get_config_dir()
}

/// Directory holding the local history database.
pub fn get_data_dir() -> PathBuf {
    imp::get_data_dir()
}

/// Default location of Chrome's `History` file for the `Default` profile.
pub fn get_chromium_history_path() -> PathBuf {
    imp::get_chromium_history_path()
}
