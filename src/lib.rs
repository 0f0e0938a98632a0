//! # remindme
//!
//! A personal reminder list for the terminal, with a reward level earned by
//! completing tasks, built-in task templates, a normal and a horror display
//! theme, and a slideshow of saved memories.
//!
//! The core is small:
//!
//! *   [`storage::TaskStore`] owns every [`models::Task`] and validates writes.
//! *   [`derived`], [`rewards`] and [`format`] are pure functions over task
//!     snapshots. Current time and randomness are always parameters.
//!
//! Everything else ([`commands`], [`tui`], [`theme`], [`calendar`],
//! [`memories`]) is presentation built on top of those.

pub mod calendar;
pub mod commands;
pub mod config;
pub mod derived;
pub mod error;
pub mod format;
pub mod logging;
pub mod memories;
pub mod models;
pub mod rewards;
pub mod storage;
pub mod templates;
pub mod theme;
pub mod tui;
