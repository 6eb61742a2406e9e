//! HTTP client for the search API
//!
//! Every request is a GET. A status outside 2xx/3xx becomes
//! `Error::HttpStatus` carrying the response body. When `max_retries` is
//! above zero, timeouts, connection failures and retryable statuses are
//! retried with exponential backoff; a 429 waits for `Retry-After` when the
//! server sends one.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for relative request paths
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt (0 = single attempt)
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each retry after that
    pub initial_backoff: Duration,
    /// Upper bound on any single retry delay
    pub max_backoff: Duration,
    /// Client-side rate limit
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(60),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("repo-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the delay before the first retry
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.config.initial_backoff = delay;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query parameters for a single request, sent in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Result of one attempt at a request
enum Attempt {
    Done(Response),
    Retry { error: Error, delay: Duration },
    Failed(Error),
}

/// HTTP client with optional retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client; fails if a default header is not a valid HTTP header
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(header_map(&config.default_headers)?)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// GET `url`, which is absolute or relative to the base URL
    pub async fn get(&self, url: &str, request: RequestConfig) -> Result<Response> {
        let url = self.build_url(url);
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            match self.attempt(&url, &request, attempt).await {
                Attempt::Done(response) => {
                    debug!(url = %url, attempt, "Request succeeded");
                    return Ok(response);
                }
                Attempt::Failed(error) => return Err(error),
                Attempt::Retry { error, delay } => {
                    warn!(
                        url = %url,
                        attempt = attempt + 1,
                        max_attempts = self.config.max_retries + 1,
                        error = %error,
                        "Request failed, retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, url: &str, request: &RequestConfig, attempt: u32) -> Attempt {
        let retries_left = attempt < self.config.max_retries;

        let mut builder = self.client.get(url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let transient = e.is_timeout() || e.is_connect();
                let error = if e.is_timeout() {
                    Error::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else {
                    Error::Http(e)
                };
                return if transient && retries_left {
                    Attempt::Retry {
                        error,
                        delay: self.calculate_backoff(attempt),
                    }
                } else {
                    Attempt::Failed(error)
                };
            }
        };

        let status = response.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Attempt::Done(response);
        }

        let retry_after = retry_after(&response);
        let body = response.text().await.unwrap_or_default();
        let error = Error::http_status(status.as_u16(), body);

        if !(retries_left && error.is_retryable()) {
            return Attempt::Failed(error);
        }

        let delay = match retry_after {
            Some(delay) if status == StatusCode::TOO_MANY_REQUESTS => delay,
            _ => self.calculate_backoff(attempt),
        };
        Attempt::Retry { error, delay }
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }

    /// Delay before retry number `attempt + 1`
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        self.config
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Header values carry the credential; show names only.
        let mut header_names: Vec<&str> = self
            .config
            .default_headers
            .keys()
            .map(String::as_str)
            .collect();
        header_names.sort_unstable();

        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("max_retries", &self.config.max_retries)
            .field("default_headers", &header_names)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Convert configured headers, marking the credential as sensitive
fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let invalid = |e: &dyn std::fmt::Display| {
            Error::invalid_value("http.default_headers", format!("{name}: {e}"))
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
        let mut header_value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
        if header_name == AUTHORIZATION {
            header_value.set_sensitive(true);
        }
        map.insert(header_name, header_value);
    }

    Ok(map)
}

/// `Retry-After` in seconds, when present and numeric
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
}
