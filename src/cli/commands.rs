//! CLI commands and argument parsing

use crate::types::{OutputFormat, SortKey, SortOrder};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Export repository search results to a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "repo-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all matching repositories and write them to a file
    Export {
        #[command(flatten)]
        search: SearchArgs,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Attempts to save while the output file is locked
        #[arg(long)]
        lock_retries: Option<u32>,

        /// Pause between save attempts, in milliseconds
        #[arg(long)]
        lock_retry_delay_ms: Option<u64>,

        /// Wait for Enter instead of sleeping when the output file is locked
        #[arg(long)]
        interactive: bool,
    },

    /// Report how many repositories match, without fetching them all
    Count {
        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Search options shared by every command; unset values come from the config
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Search text, in the platform's query syntax
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort field
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort direction
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Results per page (1-100)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Maximum results to fetch (at most 1000)
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Page requests in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// API root URL
    #[arg(long)]
    pub base_url: Option<String>,
}
