//! # Recipients Search
//!
//! Command line front end for the recipients index: point lookups, writes,
//! free-text search, segment queries and the undeliverable report.
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`commands`]: Argument parsing and command execution
//! - [`errors`]: Error types for the binary

pub mod commands;
pub mod config;
pub mod errors;

pub use commands::{Cli, CliCommand, Command};
pub use config::{Dependencies, Settings};
pub use errors::AppError;
