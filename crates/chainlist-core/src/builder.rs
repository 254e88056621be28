//! Registry construction: remote source first, fallback snapshot otherwise.
//!
//! The remote result is used only if the whole pipeline (fetch → extract →
//! convert → decode) succeeds and yields at least one record. Remote and
//! fallback data are never merged.

use crate::error::{RegistryError, SourceError};
use crate::fallback::Fallback;
use crate::parser::SourceParser;
use crate::record::ChainRecord;
use crate::registry::{ChainRegistry, RegistryOrigin};
use crate::source::DocumentFetcher;

struct RemoteStage {
    fetcher: Box<dyn DocumentFetcher>,
    parser: SourceParser,
}

/// One-shot builder for a [`ChainRegistry`].
///
/// ```ignore
/// let registry = RegistryBuilder::new(Fallback::Bundled)
///     .with_remote(fetcher, SourceParser::upstream()?)
///     .build()
///     .await?;
/// ```
pub struct RegistryBuilder {
    remote: Option<RemoteStage>,
    fallback: Fallback,
}

impl RegistryBuilder {
    /// Builder that loads `fallback` unless a remote stage is added.
    pub fn new(fallback: Fallback) -> Self {
        Self {
            remote: None,
            fallback,
        }
    }

    /// Try `fetcher` + `parser` before the fallback.
    pub fn with_remote(mut self, fetcher: impl DocumentFetcher + 'static, parser: SourceParser) -> Self {
        self.remote = Some(RemoteStage {
            fetcher: Box::new(fetcher),
            parser,
        });
        self
    }

    /// Run the pipeline and index the chosen records.
    ///
    /// Remote failures are logged and absorbed; only a broken fallback is
    /// returned as an error.
    pub async fn build(self) -> Result<ChainRegistry, RegistryError> {
        if let Some(stage) = &self.remote {
            match fetch_remote(stage).await {
                Ok(records) => {
                    tracing::info!(
                        source = stage.fetcher.location(),
                        records = records.len(),
                        "chain registry built from remote source"
                    );
                    return Ok(ChainRegistry::from_records(records, RegistryOrigin::Remote));
                }
                Err(e) => {
                    tracing::warn!(
                        source = stage.fetcher.location(),
                        kind = e.kind(),
                        error = %e,
                        fallback = %self.fallback.describe(),
                        "remote chain list unavailable, using fallback"
                    );
                }
            }
        }

        let records = self.fallback.load()?;
        tracing::info!(
            fallback = %self.fallback.describe(),
            records = records.len(),
            "chain registry built from fallback"
        );
        Ok(ChainRegistry::from_records(records, RegistryOrigin::Fallback))
    }
}

async fn fetch_remote(stage: &RemoteStage) -> Result<Vec<ChainRecord>, SourceError> {
    tracing::debug!(source = stage.fetcher.location(), "fetching chain list");
    let document = stage.fetcher.fetch().await?;
    tracing::debug!(bytes = document.len(), "received source document");

    let records = stage.parser.parse_document(&document)?;
    if records.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticDocument;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FALLBACK: &str = r#"[{"id":1,"name":"Ethereum"},{"id":5,"name":"Goerli"}]"#;

    struct Unreachable {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DocumentFetcher for Unreachable {
        async fn fetch(&self) -> Result<String, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Timeout {
                url: "https://chains.invalid".into(),
                ms: 3000,
            })
        }

        fn location(&self) -> &str {
            "https://chains.invalid"
        }
    }

    fn parser() -> SourceParser {
        SourceParser::upstream().unwrap()
    }

    fn ids(registry: &ChainRegistry) -> Vec<u64> {
        registry.records().iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn remote_success() {
        let doc = "export const chains = [\n  { id: 10, name: 'OP Mainnet', },\n];\n";
        let reg = RegistryBuilder::new(Fallback::Json(FALLBACK.into()))
            .with_remote(StaticDocument::new("mem://doc", doc), parser())
            .build()
            .await
            .unwrap();
        assert_eq!(reg.origin(), RegistryOrigin::Remote);
        assert_eq!(ids(&reg), vec![10]);
        assert!(reg.get_chain_by_id(1).is_none(), "no merge with fallback");
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_after_one_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reg = RegistryBuilder::new(Fallback::Json(FALLBACK.into()))
            .with_remote(Unreachable { calls: calls.clone() }, parser())
            .build()
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(reg.origin(), RegistryOrigin::Fallback);
        assert_eq!(ids(&reg), vec![1, 5]);
    }

    #[tokio::test]
    async fn every_remote_failure_kind_falls_back() {
        let docs = [
            "no declaration here",
            "export const chains = [\n  { id: 1, name: mainnet },\n];",
            "export const chains = [\n  { name: 'missing id' },\n];",
            "export const chains = [\n];",
        ];
        for doc in docs {
            let reg = RegistryBuilder::new(Fallback::Json(FALLBACK.into()))
                .with_remote(StaticDocument::new("mem://doc", doc), parser())
                .build()
                .await
                .unwrap();
            assert_eq!(reg.origin(), RegistryOrigin::Fallback, "{doc}");
            assert_eq!(ids(&reg), vec![1, 5]);
        }
    }

    #[tokio::test]
    async fn offline_uses_fallback() {
        let reg = RegistryBuilder::new(Fallback::Json(FALLBACK.into()))
            .build()
            .await
            .unwrap();
        assert_eq!(reg.origin(), RegistryOrigin::Fallback);
        assert_eq!(reg.get_chain_by_name("goerli").unwrap().id, 5);
    }

    #[tokio::test]
    async fn corrupt_fallback_is_fatal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let err = RegistryBuilder::new(Fallback::Json("not json".into()))
            .with_remote(Unreachable { calls }, parser())
            .build()
            .await
            .unwrap_err();
        assert!(err.is_fallback_corruption());
    }

    #[tokio::test]
    async fn fallback_not_read_when_remote_succeeds() {
        let doc = "export const chains = [\n  { id: 1, name: 'Ethereum' },\n];";
        let reg = RegistryBuilder::new(Fallback::File("/nonexistent/chains.json".into()))
            .with_remote(StaticDocument::new("mem://doc", doc), parser())
            .build()
            .await
            .unwrap();
        assert_eq!(reg.origin(), RegistryOrigin::Remote);
    }
}
