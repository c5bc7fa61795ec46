//! Infobox command-line driver
//!
//! File-backed collaborators, configuration loading and logging setup for the
//! `infobox` binary.

#![warn(unreachable_pub)]

pub mod commands;
pub mod logging;
pub mod settings;
pub mod store;

pub use commands::{apply, inspect, summarize, ApplyOptions};
pub use settings::{load_config, parse_config, Overrides};
pub use store::{DirectoryStore, JsonRecords};
