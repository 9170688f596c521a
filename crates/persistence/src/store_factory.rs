//! Maps a configured backend name to the `StorageProvider` that opens it.
//!
//! `neo-config`'s backend-selection field drives which backend is actually
//! opened at startup, without `neo-ledger` or the `node` binary needing a
//! compile-time feature matrix per backend.

use crate::memory::MemoryStorageProvider;
use crate::rocksdb::RocksDbStorageProvider;
use crate::storage::{IStore, StorageConfig, StorageProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of storage providers keyed by backend name.
pub struct StoreFactory {
    providers: HashMap<String, Arc<dyn StorageProvider>>,
}

impl StoreFactory {
    /// Creates a registry pre-populated with the backends this crate ships:
    /// `"Memory"` and `"RocksDB"`.
    pub fn new() -> Self {
        let mut providers: HashMap<String, Arc<dyn StorageProvider>> = HashMap::new();
        let memory: Arc<dyn StorageProvider> = Arc::new(MemoryStorageProvider::new());
        let rocksdb: Arc<dyn StorageProvider> = Arc::new(RocksDbStorageProvider::new());
        providers.insert(memory.name().to_string(), memory);
        providers.insert(rocksdb.name().to_string(), rocksdb);
        Self { providers }
    }

    /// Registers (or overrides) a provider under the given backend name.
    pub fn register(&mut self, provider: Arc<dyn StorageProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    /// Opens a store with the provider registered under `backend`.
    ///
    /// Returns `Error::Configuration` if no provider is registered under
    /// that name — this is the `ConfigurationInvalid` fatal case (§7.4) when
    /// surfaced from startup.
    pub fn create_store(&self, backend: &str, config: &StorageConfig) -> crate::Result<Box<dyn IStore>> {
        let provider = self.providers.get(backend).ok_or_else(|| {
            crate::Error::Generic(format!("unknown storage backend: {backend}"))
        })?;
        provider.create_store(config)
    }

    /// Names of the backends currently registered.
    pub fn backend_names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }
}

impl Default for StoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_memory_backend_by_name() {
        let factory = StoreFactory::new();
        let store = factory
            .create_store("Memory", &StorageConfig::default())
            .expect("memory backend should be registered");
        drop(store);
    }

    #[test]
    fn unknown_backend_is_a_configuration_error() {
        let factory = StoreFactory::new();
        let result = factory.create_store("DoesNotExist", &StorageConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn lists_both_builtin_backends() {
        let factory = StoreFactory::new();
        let mut names = factory.backend_names();
        names.sort();
        assert_eq!(names, vec!["Memory".to_string(), "RocksDB".to_string()]);
    }
}
