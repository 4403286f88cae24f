//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Modes
//!
//! - `--discover` - Print the catalog built from the schema directory
//! - default - Sync the selected streams of `--catalog` (or `--properties`)
//!
//! Configuration is required in both modes.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
