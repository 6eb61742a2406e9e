//! Concurrent paginated fetching of repository search results

use super::types::{Discovery, Query, RepositoryRecord, ResultSet, SearchPage};
use crate::config::{ApiConfig, Credential};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{PagePlan, PLATFORM_RESULT_CEILING};
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

/// Fetches every page of a repository search.
///
/// Page 1 is requested alone to learn the total; the remaining pages are
/// then requested concurrently, at most `concurrency` at a time, and their
/// records are appended in the order the requests complete.
///
/// A page whose request fails contributes no records and the run carries
/// on. A page whose body cannot be decoded aborts the run.
#[derive(Debug)]
pub struct RepoFetcher {
    client: HttpClient,
    search_path: String,
    concurrency: usize,
}

impl RepoFetcher {
    /// Build a fetcher from API settings and a credential
    pub fn new(api: &ApiConfig, credential: &Credential) -> Result<Self> {
        let client = HttpClient::with_config(api.http_client_config(credential))?;
        debug!(
            base_url = %api.base_url,
            concurrency = api.concurrency,
            max_retries = api.max_retries,
            rate_limited = client.has_rate_limiter(),
            "Search client ready"
        );
        Ok(Self::with_client(client, &api.search_path, api.concurrency))
    }

    /// Build a fetcher around an existing client
    pub fn with_client(client: HttpClient, search_path: impl Into<String>, concurrency: usize) -> Self {
        Self {
            client,
            search_path: search_path.into(),
            concurrency: concurrency.max(1),
        }
    }

    /// Maximum page requests in flight
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Request page 1 and read the total from it.
    ///
    /// A failed request yields a zero total and no records rather than an
    /// error. The page-1 records are returned so they are never refetched.
    pub async fn discover_total(&self, query: &Query) -> Result<Discovery> {
        let Some(page) = self.request_page(query, 1).await? else {
            return Ok(Discovery::failed());
        };

        let reported_total = page.total_count;
        let total_count = reported_total.min(PLATFORM_RESULT_CEILING);
        info!(reported_total, "Total repositories found: {total_count}");

        let records = page.into_records();
        info!("Fetched page 1, {} repositories", records.len());

        Ok(Discovery {
            reported_total,
            total_count,
            records,
            succeeded: true,
        })
    }

    /// Fetch one page of results.
    ///
    /// A failed request is logged and yields an empty page.
    pub async fn fetch_page(&self, query: &Query, page: u32) -> Result<Vec<RepositoryRecord>> {
        let records = self
            .request_page(query, page)
            .await?
            .map(SearchPage::into_records)
            .unwrap_or_default();
        Ok(records)
    }

    /// Fetch every page of the search, up to the platform ceiling
    pub async fn fetch_all(&self, query: &Query) -> Result<ResultSet> {
        let discovery = self.discover_total(query).await?;

        let mut result = ResultSet::new(discovery.reported_total);
        if !discovery.succeeded {
            result.record_failure(1);
        }

        let plan = PagePlan::new(discovery.total_count, query.per_page(), query.max_results());
        result.extend(plan.cap(1, discovery.records));

        if plan.total() == 0 {
            info!("Total repositories fetched: {}", result.len());
            return Ok(result);
        }

        debug!(
            pages = plan.page_count(),
            concurrency = self.concurrency,
            "Fetching remaining pages"
        );

        let mut pages = stream::iter(plan.remaining_pages())
            .map(move |page| async move { (page, self.request_page(query, page).await) })
            .buffer_unordered(self.concurrency);

        while let Some((page, outcome)) = pages.next().await {
            match outcome? {
                Some(search_page) => {
                    let records = plan.cap(page, search_page.into_records());
                    info!("Fetched page {page}, {} repositories", records.len());
                    result.extend(records);
                }
                None => result.record_failure(page),
            }
        }

        result.finish();
        info!("Total repositories fetched: {}", result.len());
        if !result.failed_pages().is_empty() {
            warn!(
                failed_pages = ?result.failed_pages(),
                "Some pages failed and contributed no repositories"
            );
        }

        Ok(result)
    }

    /// Request and decode one page; `None` when the request itself failed
    async fn request_page(&self, query: &Query, page: u32) -> Result<Option<SearchPage>> {
        let response = match self
            .client
            .get(&self.search_path, query.request_config(page))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log_page_failure(page, &e);
                return Ok(None);
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log_page_failure(page, &Error::Http(e));
                return Ok(None);
            }
        };

        let search_page: SearchPage = serde_json::from_str(&body)
            .map_err(|e| Error::record_extraction(page, e.to_string()))?;

        if search_page.incomplete_results {
            warn!(page, "Search API reported incomplete results for page {page}");
        }

        Ok(Some(search_page))
    }
}

fn log_page_failure(page: u32, err: &Error) {
    match err {
        Error::HttpStatus { status, body } if err.is_retryable() => {
            warn!(page, status, body = %body, "Error fetching page {page}: {status}");
        }
        Error::HttpStatus { status, body } => {
            error!(page, status, body = %body, "Error fetching page {page}: {status}");
        }
        other => {
            error!(page, error = %other, "Error fetching page {page}");
        }
    }
}
