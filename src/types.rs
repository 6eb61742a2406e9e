//! Common types used throughout repo-harvest
//!
//! Shared enums for search parameters and output selection. They are used
//! by the config file, the CLI and the fetcher.

use serde::{Deserialize, Serialize};

// ============================================================================
// Search Sort Key
// ============================================================================

/// Field the search API sorts results by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Star count
    #[default]
    Stars,
    /// Fork count
    Forks,
    /// Number of issues labelled "help wanted"
    HelpWantedIssues,
    /// Last update time
    Updated,
}

impl SortKey {
    /// Value sent in the `sort` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::HelpWantedIssues => "help-wanted-issues",
            SortKey::Updated => "updated",
        }
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Sort direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    /// Value sent in the `order` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// File format for exported records
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook with a styled table
    #[default]
    Xlsx,
    /// Pretty-printed JSON array
    Json,
}
