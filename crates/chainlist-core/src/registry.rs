//! The built chain registry and its lookup accessors.
//!
//! A `ChainRegistry` is plain immutable data once constructed: share it by
//! reference or `Arc` and query it from any thread without locking.

use std::collections::HashMap;
use std::fmt;

use crate::record::ChainRecord;

/// Which source the registry's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryOrigin {
    /// Fetched and parsed from the remote source document.
    Remote,
    /// Loaded from the fallback snapshot.
    Fallback,
}

impl fmt::Display for RegistryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Chain records indexed by ID and by lowercase name.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    records: Vec<ChainRecord>,
    /// id → index into `records`
    by_id: HashMap<u64, usize>,
    /// lowercase name → index into `records`
    by_name: HashMap<String, usize>,
    origin: RegistryOrigin,
}

impl ChainRegistry {
    /// Index `records` in a single pass.
    ///
    /// When two records share an ID or a lowercased name, the later one wins
    /// that slot. The earlier record is still kept in [`records`](Self::records).
    pub fn from_records(records: Vec<ChainRecord>, origin: RegistryOrigin) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if let Some(prev) = by_id.insert(record.id, idx) {
                tracing::debug!(
                    id = record.id,
                    previous = %records[prev].name,
                    replacement = %record.name,
                    "duplicate chain id, later record wins"
                );
            }
            if let Some(prev) = by_name.insert(record.name_key(), idx) {
                tracing::debug!(
                    name = %record.name,
                    previous_id = records[prev].id,
                    replacement_id = record.id,
                    "duplicate chain name, later record wins"
                );
            }
        }

        Self {
            records,
            by_id,
            by_name,
            origin,
        }
    }

    /// Look up a chain by its numeric ID.
    pub fn get_chain_by_id(&self, id: u64) -> Option<&ChainRecord> {
        self.by_id.get(&id).map(|&idx| &self.records[idx])
    }

    /// Look up a chain by name, ignoring case.
    ///
    /// The query is lowercased as-is: surrounding whitespace is not trimmed
    /// and no Unicode normalization is applied.
    pub fn get_chain_by_name(&self, name: &str) -> Option<&ChainRecord> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.records[idx])
    }

    /// Returns `true` if a chain with this ID is known.
    pub fn contains_id(&self, id: u64) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of distinct chain IDs.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All records in source order, including ones shadowed by a later duplicate.
    pub fn records(&self) -> &[ChainRecord] {
        &self.records
    }

    /// Iterate over the records reachable by ID, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &ChainRecord)> + '_ {
        self.by_id.iter().map(|(&id, &idx)| (id, &self.records[idx]))
    }

    pub fn origin(&self) -> RegistryOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry(records: Vec<ChainRecord>) -> ChainRegistry {
        ChainRegistry::from_records(records, RegistryOrigin::Fallback)
    }

    #[test]
    fn lookup_by_id_and_name() {
        let reg = registry(vec![
            ChainRecord::new(1, "Ethereum"),
            ChainRecord::new(10, "OP Mainnet"),
        ]);
        assert_eq!(reg.get_chain_by_id(1).unwrap().name, "Ethereum");
        assert_eq!(reg.get_chain_by_name("ethereum").unwrap().id, 1);
        assert_eq!(reg.get_chain_by_name("OP MAINNET").unwrap().id, 10);
        assert_eq!(reg.get_chain_by_name("oP mAiNnEt").unwrap().id, 10);
        assert_eq!(reg.len(), 2);
        assert!(reg.contains_id(10));
        assert_eq!(reg.origin(), RegistryOrigin::Fallback);
    }

    #[test]
    fn unknown_keys_are_absent() {
        let reg = registry(vec![ChainRecord::new(1, "Ethereum")]);
        assert!(reg.get_chain_by_id(2).is_none());
        assert!(reg.get_chain_by_name("bitcoin").is_none());
        assert!(reg.get_chain_by_name("").is_none());
        assert!(reg.get_chain_by_name(" ethereum").is_none());
        assert!(reg.get_chain_by_name("ethereum ").is_none());
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let reg = registry(vec![
            ChainRecord::new(5, "Goerli").with_field("tag", json!("first")),
            ChainRecord::new(5, "Goerli Testnet").with_field("tag", json!("second")),
        ]);
        let found = reg.get_chain_by_id(5).unwrap();
        assert_eq!(found.field("tag").unwrap(), "second");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.records().len(), 2);
        // both names are still indexed
        assert_eq!(reg.get_chain_by_name("goerli").unwrap().field("tag").unwrap(), "first");
    }

    #[test]
    fn duplicate_name_last_write_wins_case_insensitively() {
        let reg = registry(vec![ChainRecord::new(1, "Mainnet"), ChainRecord::new(2, "MAINNET")]);
        assert_eq!(reg.get_chain_by_name("mainnet").unwrap().id, 2);
        assert_eq!(reg.get_chain_by_id(1).unwrap().name, "Mainnet");
    }

    #[test]
    fn iter_matches_lookup() {
        let reg = registry(vec![ChainRecord::new(1, "A"), ChainRecord::new(2, "B")]);
        for (id, record) in reg.iter() {
            assert_eq!(record.id, id);
            assert_eq!(reg.get_chain_by_name(&record.name), Some(record));
        }
        assert_eq!(reg.iter().count(), 2);
    }

    #[test]
    fn empty_registry() {
        let reg = registry(vec![]);
        assert!(reg.is_empty());
        assert!(reg.get_chain_by_id(1).is_none());
    }
}
