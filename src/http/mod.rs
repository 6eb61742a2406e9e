//! HTTP client module
//!
//! Provides the HTTP client used to talk to the search API.
//!
//! # Features
//!
//! - **Default Headers**: Credential and accept type sent on every request
//! - **Optional Retries**: Configurable retry logic with backoff (off by default)
//! - **Rate Limiting**: Token bucket rate limiter using governor (off by default)

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
