//! Storage abstraction for the management resource tree.
//!
//! The `ModelStore` trait defines pure data operations keyed by
//! [`ResourcePath`]. It knows nothing about schemas, constraints or the
//! staged pipeline: validation happens before anything reaches the store, and
//! the store only ever sees fully validated models.
//!
//! At the storage level create and update are the same operation: a model is
//! put at its address. Whether an address may already be occupied is decided
//! by the controller.
//!
//! # Example Usage
//!
//! ```rust
//! use model_controller::storage::{InMemoryStore, ModelStore};
//! use model_controller::resource::ResourceModel;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//! let address = "/security-realm=ManagementRealm".parse()?;
//! let attributes = json!({"map-groups-to-roles": false}).as_object().cloned().unwrap();
//!
//! store.put(ResourceModel::new(address, attributes)).await?;
//! let address = "/security-realm=ManagementRealm".parse()?;
//! assert!(store.get(&address).await?.is_some());
//! assert!(store.delete(&address).await?);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::{InMemoryStore, InMemoryStoreStats};

use crate::resource::{ResourceModel, ResourcePath};
use std::future::Future;

/// Persistence boundary for resource models.
///
/// # Design Principles
///
/// - **PUT/GET/DELETE Model**: create and update are both `put`
/// - **PUT Returns Data**: the stored model is returned as it would be read back
/// - **DELETE Returns Boolean**: whether a model existed at the address
/// - **No Validation**: models arriving here have already passed the pipeline
pub trait ModelStore: Send + Sync {
    /// Store a model at its address, replacing any existing model.
    fn put(
        &self,
        model: ResourceModel,
    ) -> impl Future<Output = Result<ResourceModel, StorageError>> + Send;

    /// Retrieve the model at an address.
    fn get(
        &self,
        address: &ResourcePath,
    ) -> impl Future<Output = Result<Option<ResourceModel>, StorageError>> + Send;

    /// Delete the model at an address.
    ///
    /// Returns `true` if a model was deleted, `false` if none existed.
    fn delete(
        &self,
        address: &ResourcePath,
    ) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Check whether a model exists at an address.
    fn exists(
        &self,
        address: &ResourcePath,
    ) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// Addresses of the direct children of `parent`, in address order.
    fn children(
        &self,
        parent: &ResourcePath,
    ) -> impl Future<Output = Result<Vec<ResourcePath>, StorageError>> + Send;

    /// Total number of stored models.
    fn count(&self) -> impl Future<Output = Result<usize, StorageError>> + Send;

    /// Remove every model. Intended for tests.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
