//! Repository search module
//!
//! # Overview
//!
//! - `Query` - What to search for and how to page through it
//! - `RepoFetcher` - Discovery request plus concurrent page fetches
//! - `RepositoryRecord` - Flat record exported per repository
//! - `Field` - Optional value that tells an absent key from `null`
//! - `ResultSet` - Records from every page that succeeded

mod fetcher;
mod types;

pub use fetcher::RepoFetcher;
pub use types::{
    ApiOwner, ApiRepository, Discovery, Field, Query, RepositoryRecord, ResultSet, SearchPage,
};
