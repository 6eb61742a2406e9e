//! Configuration for a harvest run
//!
//! Settings come from an optional YAML file, every field of which has a
//! default. The API credential is never read from the file; it comes from
//! the `GITHUB_API_TOKEN` environment variable.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::output::LockRetryPolicy;
use crate::pagination::{MAX_PER_PAGE, PLATFORM_RESULT_CEILING};
use crate::search::Query;
use crate::types::{OutputFormat, SortKey, SortOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the API token
pub const TOKEN_ENV_VAR: &str = "GITHUB_API_TOKEN";

/// Search used when none is configured
pub const DEFAULT_QUERY: &str = "(LLM OR LLMS OR chatgpt OR openai) in:readme,title,description";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search API connection settings
    pub api: ApiConfig,
    /// What to search for
    pub search: SearchConfig,
    /// Where and how to write results
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)?;

        if !self.api.search_path.starts_with('/') {
            return Err(Error::invalid_value(
                "api.search_path",
                "must start with '/'",
            ));
        }
        if self.api.concurrency == 0 {
            return Err(Error::invalid_value(
                "api.concurrency",
                "must be at least 1",
            ));
        }
        if self.api.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "api.requests_per_second",
                "must be at least 1 when set",
            ));
        }
        if self.search.query.trim().is_empty() {
            return Err(Error::invalid_value("search.query", "must not be empty"));
        }
        if !(1..=MAX_PER_PAGE).contains(&self.search.per_page) {
            return Err(Error::invalid_value(
                "search.per_page",
                format!("must be between 1 and {MAX_PER_PAGE}"),
            ));
        }
        if self.search.max_results == 0 {
            return Err(Error::invalid_value(
                "search.max_results",
                "must be at least 1",
            ));
        }
        if self.output.lock_retry.max_attempts == 0 {
            return Err(Error::invalid_value(
                "output.lock_retry.max_attempts",
                "must be at least 1",
            ));
        }
        if self.output.table_name.trim().is_empty() {
            return Err(Error::invalid_value(
                "output.table_name",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Build the immutable query described by this config
    pub fn query(&self) -> Query {
        Query::new(&self.search.query)
            .with_sort(self.search.sort)
            .with_order(self.search.order)
            .with_per_page(self.search.per_page)
            .with_max_results(self.search.max_results)
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Search API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. `https://api.github.com`
    pub base_url: String,
    /// Path of the repository search endpoint
    pub search_path: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for a failed request (0 = a failed page stays empty)
    pub max_retries: u32,
    /// First retry delay in milliseconds, doubled on each further retry
    pub retry_backoff_ms: u64,
    /// Page requests in flight at once
    pub concurrency: usize,
    /// Client-side rate limit, off when unset
    pub requests_per_second: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            search_path: "/search/repositories".to_string(),
            timeout_secs: 30,
            max_retries: 0,
            retry_backoff_ms: 500,
            // Covers the largest possible fan-out: 1000 results / 100 per page.
            concurrency: 10,
            requests_per_second: None,
        }
    }
}

impl ApiConfig {
    /// HTTP client settings, with the credential attached as a default header
    pub fn http_client_config(&self, credential: &Credential) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .initial_backoff(Duration::from_millis(self.retry_backoff_ms))
            .header("Authorization", credential.authorization_header())
            .header("Accept", "application/vnd.github+json");

        if let Some(rps) = self.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }

        builder.build()
    }
}

// ============================================================================
// Search Config
// ============================================================================

/// What to search for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search text, in the platform's query syntax
    pub query: String,
    /// Sort field
    pub sort: SortKey,
    /// Sort direction
    pub order: SortOrder,
    /// Page size (1..=100)
    pub per_page: u32,
    /// Upper bound on records to fetch
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            sort: SortKey::Stars,
            order: SortOrder::Desc,
            per_page: MAX_PER_PAGE,
            max_results: PLATFORM_RESULT_CEILING as u32,
        }
    }
}

// ============================================================================
// Output Config
// ============================================================================

/// Where and how to write results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file
    pub path: PathBuf,
    /// File format
    pub format: OutputFormat,
    /// Name of the spreadsheet table
    pub table_name: String,
    /// What to do when the output file is locked
    pub lock_retry: LockRetryConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("github_repos.xlsx"),
            format: OutputFormat::Xlsx,
            table_name: "RepoTable".to_string(),
            lock_retry: LockRetryConfig::default(),
        }
    }
}

/// Bounded retry settings for a locked output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockRetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for LockRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 2000,
        }
    }
}

impl From<&LockRetryConfig> for LockRetryPolicy {
    fn from(config: &LockRetryConfig) -> Self {
        LockRetryPolicy::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }
}

// ============================================================================
// Credential
// ============================================================================

/// API token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token value
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from `GITHUB_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(TOKEN_ENV_VAR)
    }

    /// Read the token from the named environment variable.
    ///
    /// A missing or blank variable is an error.
    pub fn from_env_var(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self(token.trim().to_string())),
            _ => Err(Error::MissingCredential {
                var: var.to_string(),
            }),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("token {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
