//! chainlist-core — chain metadata registry.
//!
//! # Overview
//!
//! Resolves a numeric chain ID or a chain name to its metadata (native
//! currency, RPC endpoints, block explorers). The registry is built once from
//! either:
//!
//! - the remote chain list, a TypeScript module whose array is extracted and
//!   converted by [`SourceParser`], or
//! - a [`Fallback`] snapshot, when the remote path fails for any reason.
//!
//! The crate defines:
//!
//! - [`ChainRecord`] — one chain, with opaque pass-through metadata
//! - [`ChainRegistry`] — immutable ID and name indices
//! - [`RegistryBuilder`] — the either/or acquisition pipeline
//! - [`DocumentFetcher`] — the trait remote transports implement
//! - [`SourceError`] / [`RegistryError`] — structured error types
//! - [`RegistryConfig`] — serde-friendly configuration

pub mod builder;
pub mod config;
pub mod error;
pub mod fallback;
pub mod parser;
pub mod record;
pub mod registry;
pub mod source;

pub use builder::RegistryBuilder;
pub use config::RegistryConfig;
pub use error::{RegistryError, SourceError};
pub use fallback::Fallback;
pub use parser::SourceParser;
pub use record::ChainRecord;
pub use registry::{ChainRegistry, RegistryOrigin};
pub use source::{DocumentFetcher, StaticDocument};
