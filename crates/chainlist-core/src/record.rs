//! The chain record — one entry of the chain list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Metadata for a single chain.
///
/// Only `id` and `name` are interpreted. Everything else (native currency,
/// RPC URLs, block explorers, testnet flags, ...) is carried through
/// untouched in `extra`, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRecord {
    /// Numeric chain ID, e.g. `1` for Ethereum mainnet.
    pub id: u64,
    /// Display name, e.g. `"Ethereum"`.
    pub name: String,
    /// Pass-through metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChainRecord {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Attach a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up a pass-through field by its source key (e.g. `"rpcUrls"`).
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Key under which this record is indexed by name.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl fmt::Display for ChainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extra_fields_round_trip() {
        let raw = json!({
            "id": 10,
            "name": "OP Mainnet",
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "rpcUrls": { "default": { "http": ["https://mainnet.optimism.io"] } }
        });
        let record: ChainRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.id, 10);
        assert_eq!(record.name, "OP Mainnet");
        assert_eq!(record.field("nativeCurrency").unwrap()["symbol"], "ETH");
        assert!(record.field("id").is_none());

        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn missing_id_rejected() {
        let err = serde_json::from_value::<ChainRecord>(json!({ "name": "NoId" }));
        assert!(err.is_err());
    }

    #[test]
    fn display_and_name_key() {
        let record = ChainRecord::new(8453, "Base");
        assert_eq!(record.to_string(), "Base (8453)");
        assert_eq!(record.name_key(), "base");
    }
}
