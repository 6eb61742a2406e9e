//! Search data model
//!
//! Wire types for the search response and the flat record exported per
//! repository.

use crate::http::RequestConfig;
use crate::pagination::{MAX_PER_PAGE, PLATFORM_RESULT_CEILING};
use crate::types::{SortKey, SortOrder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

// ============================================================================
// Query
// ============================================================================

/// An immutable repository search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    sort: SortKey,
    order: SortOrder,
    per_page: u32,
    max_results: u32,
}

impl Query {
    /// Search for `text`, most-starred first, 100 per page, up to 1000 results
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sort: SortKey::Stars,
            order: SortOrder::Desc,
            per_page: MAX_PER_PAGE,
            max_results: PLATFORM_RESULT_CEILING as u32,
        }
    }

    /// Set the sort field
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Set the sort direction
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the page size, clamped to `1..=100`
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Set the result limit, clamped to the platform ceiling
    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.min(PLATFORM_RESULT_CEILING as u32);
        self
    }

    /// Search text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sort field
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Sort direction
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Page size
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Result limit
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Query parameters for one page request
    pub fn request_config(&self, page: u32) -> RequestConfig {
        RequestConfig::new()
            .query("q", &self.text)
            .query("sort", self.sort.as_str())
            .query("order", self.order.as_str())
            .query("per_page", self.per_page.to_string())
            .query("page", page.to_string())
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Body of one search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    /// Number of matches upstream, not capped
    #[serde(default)]
    pub total_count: u64,
    /// Set when the search timed out upstream and the page may be partial
    #[serde(default)]
    pub incomplete_results: bool,
    /// Repositories on this page
    #[serde(default)]
    pub items: Vec<ApiRepository>,
}

impl SearchPage {
    /// Flatten the page's items into records
    pub fn into_records(self) -> Vec<RepositoryRecord> {
        self.items.into_iter().map(RepositoryRecord::from).collect()
    }
}

/// Repository as returned by the search API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub stargazers_count: Field<u64>,
    #[serde(default)]
    pub forks_count: Field<u64>,
    #[serde(default)]
    pub language: Field<String>,
    #[serde(default)]
    pub updated_at: Field<DateTime<Utc>>,
    pub owner: ApiOwner,
    pub created_at: DateTime<Utc>,
    /// Must be present; null for repositories that were never pushed to
    #[serde(deserialize_with = "present_but_nullable")]
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

/// Owner block of a repository
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOwner {
    pub login: String,
    pub html_url: String,
}

/// Deserialize an `Option` whose key must exist even when its value is null.
///
/// Without `default`, serde reports a missing key as an error for fields
/// using `deserialize_with`.
fn present_but_nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

// ============================================================================
// Optional Field
// ============================================================================

/// An optional response field, keeping an absent key apart from `null`.
///
/// Use with `#[serde(default)]` so an absent key decodes as `Missing`.
/// Serializes as the value or `null`; pair with
/// `skip_serializing_if = "Field::is_missing"` to leave missing keys out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<T> {
    /// Key absent from the response
    Missing,
    /// Key present with a `null` value
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    /// True when the key was absent
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => serializer.serialize_some(v),
            Field::Missing | Field::Null => serializer.serialize_none(),
        }
    }
}

// ============================================================================
// Repository Record
// ============================================================================

/// Flat, read-only snapshot of one repository
///
/// Field order is the export column order. Optional columns keep whether
/// the API left the key out or sent `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub description: Field<String>,
    #[serde(rename = "stargazers_count", default, skip_serializing_if = "Field::is_missing")]
    pub star_count: Field<u64>,
    #[serde(rename = "forks_count", default, skip_serializing_if = "Field::is_missing")]
    pub fork_count: Field<u64>,
    #[serde(rename = "language", default, skip_serializing_if = "Field::is_missing")]
    pub primary_language: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub updated_at: Field<DateTime<Utc>>,
    pub owner_login: String,
    #[serde(rename = "owner_html_url")]
    pub owner_url: String,
    pub created_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

impl From<ApiRepository> for RepositoryRecord {
    fn from(repo: ApiRepository) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            primary_language: repo.language,
            updated_at: repo.updated_at,
            owner_login: repo.owner.login,
            owner_url: repo.owner.html_url,
            created_at: repo.created_at,
            pushed_at: repo.pushed_at,
            html_url: repo.html_url,
        }
    }
}

// ============================================================================
// Discovery & Result Set
// ============================================================================

/// Outcome of the page-1 request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovery {
    /// Total as reported upstream
    pub reported_total: u64,
    /// Reported total clamped to the platform ceiling; 0 when discovery failed
    pub total_count: u64,
    /// Records embedded in the page-1 response
    pub records: Vec<RepositoryRecord>,
    /// False when the request failed and the run proceeds with no results
    pub succeeded: bool,
}

impl Discovery {
    /// Discovery that failed: zero total, no records
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Records gathered across all pages, in completion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    reported_total: u64,
    records: Vec<RepositoryRecord>,
    failed_pages: Vec<u32>,
}

impl ResultSet {
    /// Empty set for a search that reported `reported_total` matches
    pub fn new(reported_total: u64) -> Self {
        Self {
            reported_total,
            ..Self::default()
        }
    }

    /// Total reported by the search API, before any clamping
    pub fn reported_total(&self) -> u64 {
        self.reported_total
    }

    /// Number of records gathered
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records were gathered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gathered records
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<RepositoryRecord> {
        self.records
    }

    /// Pages that failed and contributed nothing, ascending
    pub fn failed_pages(&self) -> &[u32] {
        &self.failed_pages
    }

    /// Repository ids, ignoring arrival order
    pub fn ids(&self) -> BTreeSet<u64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub(crate) fn extend(&mut self, records: Vec<RepositoryRecord>) {
        self.records.extend(records);
    }

    pub(crate) fn record_failure(&mut self, page: u32) {
        self.failed_pages.push(page);
    }

    pub(crate) fn finish(&mut self) {
        self.failed_pages.sort_unstable();
    }
}
