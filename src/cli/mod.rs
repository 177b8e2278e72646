//! CLI command handlers
//!
//! This module bridges clap argument parsing and the interactive loop with
//! the session and service layers.

pub mod db;
pub mod display;
pub mod prompts;
pub mod repl;

pub use db::{handle_db_command, DbCommands};
pub use repl::run_session;
