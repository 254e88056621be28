//! chainlist-http — remote source for the chainlist registry.
//!
//! Provides [`HttpFetcher`], the `reqwest`-backed [`DocumentFetcher`], and two
//! entry points that turn a [`RegistryConfig`] into a built registry:
//!
//! - [`load_registry`] for async callers
//! - [`load_registry_blocking`] for synchronous start-up code
//!
//! ```ignore
//! let registry = chainlist_http::load_registry(&RegistryConfig::default()).await?;
//! let eth = registry.get_chain_by_id(1);
//! ```
//!
//! [`DocumentFetcher`]: chainlist_core::DocumentFetcher

pub mod client;

pub use client::HttpFetcher;

use chainlist_core::{ChainRegistry, RegistryBuilder, RegistryConfig, RegistryError, SourceParser};

/// Build a registry: one remote attempt (if enabled), then the fallback.
///
/// A fetcher that cannot even be constructed (bad URL, TLS setup) counts as a
/// remote failure and goes straight to the fallback. Only an empty
/// declaration name and a corrupt fallback are returned as errors.
pub async fn load_registry(config: &RegistryConfig) -> Result<ChainRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new(config.fallback());
    if config.remote_enabled {
        let parser = SourceParser::new(config.declaration.clone())?;
        match HttpFetcher::from_config(config) {
            Ok(fetcher) => builder = builder.with_remote(fetcher, parser),
            Err(e) => {
                tracing::warn!(
                    source = %config.source_url,
                    kind = e.kind(),
                    error = %e,
                    "remote chain list unavailable, using fallback"
                );
            }
        }
    }
    builder.build().await
}

/// Blocking variant of [`load_registry`].
///
/// Runs the build on a private current-thread runtime. Calling it from inside
/// a Tokio runtime returns [`RegistryError::Runtime`] instead of blocking the
/// executor.
pub fn load_registry_blocking(config: &RegistryConfig) -> Result<ChainRegistry, RegistryError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(RegistryError::Runtime(
            "load_registry_blocking called from within an async runtime; use load_registry".into(),
        ));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RegistryError::Runtime(e.to_string()))?;
    runtime.block_on(load_registry(config))
}
