//! Taskboard command-line interface
//!
//! Commands:
//! - `taskboard serve`: run the HTTP API over the configured data file
//! - `taskboard init`: create a board document
//! - `taskboard cards list|show|add|update|move|delete`: edit cards
//! - `taskboard board`: print cards grouped by column
//! - `taskboard watch`: print the board and redraw on server changes
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;

pub use cli::{CardFields, CardsCommand, Cli, Commands};
pub use config::{Config, Overrides};
