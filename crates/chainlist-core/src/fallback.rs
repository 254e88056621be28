//! Fallback snapshot loading.
//!
//! The snapshot is trusted: it is decoded into [`ChainRecord`]s but not
//! re-validated beyond that. Any failure here is fatal because there is no
//! further source to fall back to.

use std::path::PathBuf;

use crate::error::RegistryError;
use crate::record::ChainRecord;

/// Snapshot compiled into the crate.
pub const BUNDLED_SNAPSHOT: &str = include_str!("../data/chains.json");

/// Where the fallback chain list comes from.
#[derive(Debug, Clone, Default)]
pub enum Fallback {
    /// The snapshot shipped inside this crate.
    #[default]
    Bundled,
    /// A JSON array file on local disk.
    File(PathBuf),
    /// In-memory JSON array text.
    Json(String),
}

impl Fallback {
    /// Human-readable origin, used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled => "bundled snapshot".into(),
            Self::File(path) => path.display().to_string(),
            Self::Json(_) => "inline JSON".into(),
        }
    }

    /// Read and decode the snapshot.
    pub fn load(&self) -> Result<Vec<ChainRecord>, RegistryError> {
        let corruption = |reason: String| RegistryError::FallbackCorruption {
            origin: self.describe(),
            reason,
        };

        let records: Vec<ChainRecord> = match self {
            Self::Bundled => serde_json::from_str(BUNDLED_SNAPSHOT),
            Self::Json(text) => serde_json::from_str(text),
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| corruption(e.to_string()))?;
                serde_json::from_str(&text)
            }
        }
        .map_err(|e| corruption(e.to_string()))?;

        tracing::debug!(origin = %self.describe(), records = records.len(), "loaded fallback snapshot");
        Ok(records)
    }
}
