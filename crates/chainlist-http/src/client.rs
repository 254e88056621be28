//! HTTP document fetcher backed by `reqwest`.
//!
//! Exactly one GET per `fetch` call. No retries, no backoff: any failure is
//! reported to the registry builder, which switches to the fallback.

use async_trait::async_trait;
use std::time::Duration;

use chainlist_core::{DocumentFetcher, RegistryConfig, SourceError};

/// Fetches the remote chain list document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher for `url` with an overall request timeout.
    ///
    /// An unparseable URL or an HTTP client that cannot be built is reported
    /// as a fetch failure, so callers can fall back like for any other
    /// remote error.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        if let Err(e) = reqwest::Url::parse(&url) {
            return Err(SourceError::Http {
                reason: format!("invalid source URL: {e}"),
                url,
            });
        }

        let http = match reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chainlist/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(http) => http,
            Err(e) => {
                return Err(SourceError::Http {
                    reason: format!("failed to build HTTP client: {e}"),
                    url,
                })
            }
        };

        Ok(Self { url, http, timeout })
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, SourceError> {
        Self::new(config.source_url.clone(), config.timeout())
    }

    /// Timeout in whole milliseconds, saturating at `u64::MAX`.
    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn classify(&self, e: reqwest::Error) -> SourceError {
        if e.is_timeout() {
            SourceError::Timeout {
                url: self.url.clone(),
                ms: self.timeout_ms(),
            }
        } else {
            SourceError::Http {
                url: self.url.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String, SourceError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        tracing::debug!(url = %self.url, status = status.as_u16(), "chain list response");
        if status != reqwest::StatusCode::OK {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| self.classify(e))
    }

    fn location(&self) -> &str {
        &self.url
    }
}
