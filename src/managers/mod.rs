// ticketscope history sources
// The local SQLite store is always available; the Chromium reader sits behind the `chromium` feature.

#[cfg(feature = "chromium")]
pub mod chromium_history;
pub mod history_manager;
