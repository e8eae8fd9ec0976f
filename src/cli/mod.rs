//! CLI module
//!
//! Command-line interface for the extract job.
//!
//! # Commands
//!
//! - `run` - Extract every warehouse (default when no command is given)
//! - `catalog` - List the query catalog
//! - `urls` - Print request URLs for one warehouse

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
