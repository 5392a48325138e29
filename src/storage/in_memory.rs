//! In-memory storage implementation for resource models.
//!
//! Thread-safe implementation of [`ModelStore`] using an ordered map behind a
//! tokio `RwLock`. Suitable for tests, embedded use and as the reference
//! implementation of the storage contract.
//!
//! # Performance Characteristics
//!
//! * PUT/GET/DELETE/EXISTS: O(log n)
//! * CHILDREN: O(log n + k) over the addresses sharing the parent prefix

use crate::resource::{ResourceModel, ResourcePath};
use crate::storage::{ModelStore, StorageError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory model store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<BTreeMap<ResourcePath, ResourceModel>>>,
}

/// Statistics about an [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStoreStats {
    pub total_resources: usize,
    pub resource_types: usize,
    pub max_depth: usize,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStoreStats {
        let data_guard = self.data.read().await;
        let mut types: Vec<&str> = data_guard
            .keys()
            .filter_map(|path| path.last().map(|element| element.key()))
            .collect();
        types.sort_unstable();
        types.dedup();

        InMemoryStoreStats {
            total_resources: data_guard.len(),
            resource_types: types.len(),
            max_depth: data_guard.keys().map(ResourcePath::len).max().unwrap_or(0),
        }
    }

    /// All stored addresses in order.
    pub async fn addresses(&self) -> Vec<ResourcePath> {
        self.data.read().await.keys().cloned().collect()
    }
}

impl ModelStore for InMemoryStore {
    async fn put(&self, model: ResourceModel) -> Result<ResourceModel, StorageError> {
        if model.address().is_pattern() {
            return Err(StorageError::invalid_data(format!(
                "cannot store a model at wildcard address {}",
                model.address()
            )));
        }

        let mut data_guard = self.data.write().await;
        data_guard.insert(model.address().clone(), model.clone());
        Ok(model)
    }

    async fn get(&self, address: &ResourcePath) -> Result<Option<ResourceModel>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.get(address).cloned())
    }

    async fn delete(&self, address: &ResourcePath) -> Result<bool, StorageError> {
        let mut data_guard = self.data.write().await;
        Ok(data_guard.remove(address).is_some())
    }

    async fn exists(&self, address: &ResourcePath) -> Result<bool, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.contains_key(address))
    }

    async fn children(&self, parent: &ResourcePath) -> Result<Vec<ResourcePath>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .range(parent.clone()..)
            .map(|(address, _)| address)
            .take_while(|address| address.elements().starts_with(parent.elements()))
            .filter(|address| address.is_child_of(parent))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.data.read().await.len())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.data.write().await.clear();
        Ok(())
    }
}
