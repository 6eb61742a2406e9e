// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # repo-harvest
//!
//! Pulls every repository matching a GitHub search query and writes the
//! results to an Excel table.
//!
//! ## Features
//!
//! - **Concurrent pagination**: one discovery request, then the remaining
//!   pages fetched in parallel
//! - **Result ceiling**: never asks for more than the platform's 1000 results
//! - **Styled output**: `.xlsx` with a banded `TableStyleMedium9` table, or JSON
//! - **Locked file handling**: bounded retry with operator notification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use repo_harvest::{AppConfig, Credential, RepoFetcher, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::default();
//!     let credential = Credential::from_env()?;
//!     let fetcher = RepoFetcher::new(&config.api, &credential)?;
//!
//!     let result = fetcher.fetch_all(&config.query()).await?;
//!     println!("{} of {} repositories", result.len(), result.reported_total());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      CLI (export, count)                 │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴─────────────┬───────────────┐
//! │    Search    │        Pagination         │    Output     │
//! ├──────────────┼───────────────────────────┼───────────────┤
//! │ Query        │ PagePlan                  │ xlsx table    │
//! │ Discovery    │ 1000-result ceiling       │ JSON          │
//! │ Fan-out      │ Per-page capacity         │ Lock retry    │
//! └──────────────┴───────────────────────────┴───────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │             HTTP (retry, backoff, rate limit)            │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration file and credentials
pub mod config;

/// HTTP client with retry and rate limiting
pub mod http;

/// Page planning under the result ceiling
pub mod pagination;

/// Repository search and concurrent page fetching
pub mod search;

/// Spreadsheet and JSON output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::{AppConfig, Credential};
pub use search::{Query, RepoFetcher, RepositoryRecord, ResultSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
