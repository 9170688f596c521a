//! In-memory storage implementation.
//!
//! A sorted-map backed `IStore` used for tests, local/private networks, and
//! any deployment that does not need durability across restarts. Mirrors the
//! `rocksdb` module's shape so the two backends are interchangeable behind
//! the `StorageProvider`/`IStore` contract.

use crate::storage::{
    IReadOnlyStore, IStore, IStoreSnapshot, IWriteStore, SeekDirection, StorageConfig,
    StorageProvider,
};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// In-memory store backed by a sorted map, shared behind a lock so clones
/// (and the snapshots derived from them) observe the same underlying data.
#[derive(Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    fn find_in(
        map: &BTreeMap<Vec<u8>, Vec<u8>>,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut items: Vec<(Vec<u8>, Vec<u8>)> = match key_or_prefix {
            Some(prefix) => map
                .range(prefix.to_vec()..)
                .take_while(|(k, _)| k.starts_with(prefix))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        };

        if direction == SeekDirection::Backward {
            items.reverse();
        }

        items
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        self.data
            .read()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned()
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        self.data
            .read()
            .expect("memory store lock poisoned")
            .contains_key(key)
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let map = self.data.read().expect("memory store lock poisoned");
        Box::new(Self::find_in(&map, key_or_prefix, direction).into_iter())
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for MemoryStore {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data
            .write()
            .expect("memory store lock poisoned")
            .insert(key, value);
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.data
            .write()
            .expect("memory store lock poisoned")
            .remove(key);
    }
}

impl IStore for MemoryStore {
    fn get_snapshot(&self) -> Box<dyn IStoreSnapshot> {
        let snapshot_data = self
            .data
            .read()
            .expect("memory store lock poisoned")
            .clone();
        Box::new(MemorySnapshot {
            store: self.clone(),
            local: snapshot_data,
            writes: BTreeMap::new(),
        })
    }
}

/// A point-in-time view over a [`MemoryStore`]. Reads are served from a
/// private copy taken at snapshot creation; writes are buffered locally and
/// only applied to the backing store on `commit`.
pub struct MemorySnapshot {
    store: MemoryStore,
    local: BTreeMap<Vec<u8>, Vec<u8>>,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl IReadOnlyStore<Vec<u8>, Vec<u8>> for MemorySnapshot {
    fn try_get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(Some(value)) => Some(value.clone()),
            Some(None) => None,
            None => self.local.get(key).cloned(),
        }
    }

    fn contains(&self, key: &Vec<u8>) -> bool {
        self.try_get(key).is_some()
    }

    fn find(
        &self,
        key_or_prefix: Option<&[u8]>,
        direction: SeekDirection,
    ) -> Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)>> {
        let mut merged = self.local.clone();
        for (key, value) in &self.writes {
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Box::new(MemoryStore::find_in(&merged, key_or_prefix, direction).into_iter())
    }
}

impl IWriteStore<Vec<u8>, Vec<u8>> for MemorySnapshot {
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: &Vec<u8>) {
        self.writes.insert(key.clone(), None);
    }
}

impl IStoreSnapshot for MemorySnapshot {
    fn store(&self) -> &dyn IStore {
        &self.store
    }

    fn commit(&mut self) {
        let mut map = self
            .store
            .data
            .write()
            .expect("memory store lock poisoned");
        for (key, value) in std::mem::take(&mut self.writes) {
            match value {
                Some(v) => {
                    map.insert(key, v);
                }
                None => {
                    map.remove(&key);
                }
            }
        }
    }
}

/// In-memory storage provider, selected by `neo-config`'s backend-selection
/// field (§11.3 store factory) when a node runs without durable storage.
#[derive(Default)]
pub struct MemoryStorageProvider;

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn name(&self) -> &str {
        "Memory"
    }

    fn create_store(&self, _config: &StorageConfig) -> crate::Result<Box<dyn IStore>> {
        Ok(Box::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete_round_trip() {
        let mut store = MemoryStore::new();
        store.put(b"a".to_vec(), b"1".to_vec());
        assert_eq!(store.try_get(&b"a".to_vec()), Some(b"1".to_vec()));
        assert!(store.contains(&b"a".to_vec()));

        store.delete(&b"a".to_vec());
        assert_eq!(store.try_get(&b"a".to_vec()), None);
    }

    #[test]
    fn find_respects_prefix_and_direction() {
        let mut store = MemoryStore::new();
        store.put(b"ab1".to_vec(), b"1".to_vec());
        store.put(b"ab2".to_vec(), b"2".to_vec());
        store.put(b"zz".to_vec(), b"3".to_vec());

        let forward: Vec<_> = store.find(Some(b"ab"), SeekDirection::Forward).collect();
        assert_eq!(
            forward,
            vec![(b"ab1".to_vec(), b"1".to_vec()), (b"ab2".to_vec(), b"2".to_vec())]
        );

        let backward: Vec<_> = store.find(Some(b"ab"), SeekDirection::Backward).collect();
        assert_eq!(
            backward,
            vec![(b"ab2".to_vec(), b"2".to_vec()), (b"ab1".to_vec(), b"1".to_vec())]
        );
    }

    #[test]
    fn snapshot_is_isolated_until_commit() {
        let mut store = MemoryStore::new();
        store.put(b"k".to_vec(), b"v1".to_vec());

        let mut snapshot = store.get_snapshot();
        snapshot.put(b"k".to_vec(), b"v2".to_vec());
        snapshot.put(b"new".to_vec(), b"v3".to_vec());

        // The backing store is untouched before commit.
        assert_eq!(store.try_get(&b"k".to_vec()), Some(b"v1".to_vec()));
        assert_eq!(store.try_get(&b"new".to_vec()), None);

        snapshot.commit();

        assert_eq!(store.try_get(&b"k".to_vec()), Some(b"v2".to_vec()));
        assert_eq!(store.try_get(&b"new".to_vec()), Some(b"v3".to_vec()));
    }

    #[test]
    fn dropping_a_snapshot_discards_its_writes() {
        let mut store = MemoryStore::new();
        store.put(b"k".to_vec(), b"v1".to_vec());

        {
            let mut snapshot = store.get_snapshot();
            snapshot.put(b"k".to_vec(), b"v2".to_vec());
            // snapshot dropped without commit
        }

        assert_eq!(store.try_get(&b"k".to_vec()), Some(b"v1".to_vec()));
    }
}
