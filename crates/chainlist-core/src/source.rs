//! The `DocumentFetcher` trait — the seam between the pipeline and the network.

use async_trait::async_trait;

use crate::error::SourceError;

/// Retrieves the raw source document that embeds the chain array.
///
/// Implementations make a single attempt per call; the registry builder
/// calls `fetch` at most once.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document body as text.
    async fn fetch(&self) -> Result<String, SourceError>;

    /// Identifier of the source (usually its URL), for logging.
    fn location(&self) -> &str;
}

/// A fetcher that returns a fixed document. Useful for offline use and tests.
#[derive(Debug, Clone)]
pub struct StaticDocument {
    location: String,
    body: String,
}

impl StaticDocument {
    pub fn new(location: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl DocumentFetcher for StaticDocument {
    async fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.body.clone())
    }

    fn location(&self) -> &str {
        &self.location
    }
}
