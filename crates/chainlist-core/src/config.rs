//! Registry acquisition configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::fallback::Fallback;
use crate::parser::DEFAULT_DECLARATION;

/// Upstream TypeScript module holding the chain list.
pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/wevm/viem/main/src/chains.ts";

/// Configuration for building a [`ChainRegistry`](crate::ChainRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// URL of the remote source document.
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Name of the array declaration inside the document.
    #[serde(default = "default_declaration")]
    pub declaration: String,
    /// Timeout for the single remote request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Set to `false` to skip the remote source and load the fallback directly.
    #[serde(default = "bool_true")]
    pub remote_enabled: bool,
    /// Local JSON snapshot. `None` uses the snapshot bundled with the crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_path: Option<PathBuf>,
}

fn default_source_url() -> String { DEFAULT_SOURCE_URL.into() }
fn default_declaration() -> String { DEFAULT_DECLARATION.into() }
fn default_timeout_ms() -> u64 { 3_000 }
fn bool_true() -> bool { true }

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            declaration: default_declaration(),
            timeout_ms: default_timeout_ms(),
            remote_enabled: true,
            fallback_path: None,
        }
    }
}

impl RegistryConfig {
    /// Config that never touches the network.
    pub fn offline() -> Self {
        Self {
            remote_enabled: false,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The fallback described by this config.
    pub fn fallback(&self) -> Fallback {
        match &self.fallback_path {
            Some(path) => Fallback::File(path.clone()),
            None => Fallback::Bundled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_json() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.declaration, "chains");
        assert!(config.remote_enabled);
        assert!(matches!(config.fallback(), Fallback::Bundled));
    }

    #[test]
    fn overrides() {
        let config: RegistryConfig = serde_json::from_str(
            r#"{ "timeout_ms": 500, "remote_enabled": false, "fallback_path": "/opt/chains.json" }"#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert!(!config.remote_enabled);
        assert!(matches!(config.fallback(), Fallback::File(p) if p == PathBuf::from("/opt/chains.json")));
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn offline_disables_remote() {
        assert!(!RegistryConfig::offline().remote_enabled);
    }
}
