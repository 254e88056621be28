//! Error types for the chainlist acquisition pipeline.

use thiserror::Error;

/// Errors on the remote path: fetch → extract → convert → decode.
///
/// None of these ever escape [`RegistryBuilder::build`](crate::RegistryBuilder::build);
/// each one is logged and turned into a fallback.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    /// The server answered with anything other than `200 OK`.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out after {ms}ms")]
    Timeout { url: String, ms: u64 },

    /// The document does not contain the expected array declaration.
    #[error("Declaration `{declaration}` not found in source document")]
    DeclarationNotFound { declaration: String },

    /// The extracted array is not valid source-format notation.
    #[error("Syntax error at {line}:{column}: {reason}")]
    Syntax {
        line: usize,
        column: usize,
        reason: String,
    },

    /// The converted array does not have the chain record shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The array parsed cleanly but contains no records.
    #[error("Source array contains no chain records")]
    Empty,
}

impl SourceError {
    /// Short, stable label for the failure stage. Used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http { .. } | Self::Status { .. } | Self::Timeout { .. } => "fetch",
            Self::DeclarationNotFound { .. } => "extraction",
            Self::Syntax { .. } => "conversion",
            Self::Decode(_) => "decode",
            Self::Empty => "empty",
        }
    }

    /// Returns `true` for transport, status and timeout failures.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Timeout { .. }
        )
    }
}

/// Errors that prevent a registry from being built at all.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The fallback snapshot is missing or invalid. There is nothing left to
    /// fall back to, so this is fatal.
    #[error("Fallback snapshot {origin} is unusable: {reason}")]
    FallbackCorruption { origin: String, reason: String },

    /// Invalid configuration, such as an empty declaration name.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The blocking helper could not start its runtime.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl RegistryError {
    /// Returns `true` if this is a fallback corruption error.
    pub fn is_fallback_corruption(&self) -> bool {
        matches!(self, Self::FallbackCorruption { .. })
    }
}
