//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for Skraper:
//! - Building the HTTP client with the configured identification and headers
//! - GET requests returning the raw body bytes
//! - Classifying failures into a single [`FetchError`]
//!
//! The fetcher never retries. A non-2xx status is a failure exactly like a
//! network error; no partial content is returned.

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A failed fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// The request did not complete within the configured timeout
    #[error("Request timeout for {url}")]
    Timeout { url: String },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. } | Self::HttpStatus { url, .. } | Self::Timeout { url } => url,
        }
    }
}

/// Thin wrapper around a configured HTTP client
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher from the HTTP configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use skraper::config::HttpConfig;
    /// use skraper::crawler::Fetcher;
    ///
    /// let fetcher = Fetcher::new(&HttpConfig::default()).unwrap();
    /// ```
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches `url` and returns the body bytes
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Non-2xx status | `HttpStatus` |
    /// | Timeout elapsed | `Timeout` |
    /// | Anything else | `Network` |
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        Ok(body.to_vec())
    }
}

/// Builds an HTTP client with the configured user agent, headers and timeouts
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        // Validated at config load; anything still invalid is skipped
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Skipping invalid header '{}'", name),
        }
    }

    Client::builder()
        .user_agent(config.effective_user_agent())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if let Some(status) = error.status() {
        FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
