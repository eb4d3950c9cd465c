//! ticketscope: finds ticket detail pages in browsing history.
//!
//! A search resolves a time window ("today", "thisWeek", a number of hours)
//! to a start timestamp, asks a history store for ticket URLs since then,
//! filters them by an optional phrase and classifies each title as
//! `<classification> <action> - <subject>`.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
