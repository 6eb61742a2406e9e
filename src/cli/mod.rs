//! CLI module
//!
//! Command-line interface for harvesting repository search results.
//!
//! # Commands
//!
//! - `export` - Fetch all matching repositories and write them to a file
//! - `count` - Report how many repositories match

mod commands;
mod runner;

pub use commands::{Cli, Commands, SearchArgs};
pub use runner::Runner;
