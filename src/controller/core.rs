//! Core model controller structure and initialization.

use super::builder::{ControllerConfig, ModelControllerBuilder};
use crate::error::BuildError;
use crate::resource::{ResourceDefinition, ResourcePath};
use crate::storage::{InMemoryStore, ModelStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Coordinates resource definitions, the staged pipeline and a [`ModelStore`].
///
/// Operations on the same address are serialized from the moment the stored
/// model is read until the staged change is committed. Operations on
/// unrelated addresses run concurrently.
///
/// # Type Parameters
///
/// * `S` - The store that persists committed models
///
/// # Examples
///
/// ```rust
/// use model_controller::controller::ModelController;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let controller = ModelController::with_standard_definitions()?;
/// let realm = "/security-realm=ManagementRealm".parse()?;
/// let ldap = "/security-realm=ManagementRealm/authorization=ldap".parse()?;
///
/// controller.add(&realm, json!({})).await?;
/// controller.add(&ldap, json!({"username-attribute": "uid", "pattern": "CN=(.*?),.*"})).await?;
///
/// // Clearing pattern while nothing depends on it is allowed.
/// controller.undefine_attribute(&ldap, "pattern").await?;
/// # Ok(())
/// # }
/// ```
pub struct ModelController<S> {
    pub(super) store: S,
    pub(super) definitions: Vec<Arc<ResourceDefinition>>,
    pub(super) config: ControllerConfig,
    pub(super) locks: PathLocks,
}

impl<S: ModelStore> ModelController<S> {
    /// A controller with default configuration and no registered definitions.
    pub fn new(store: S) -> Self {
        Self {
            store,
            definitions: Vec::new(),
            config: ControllerConfig::default(),
            locks: PathLocks::default(),
        }
    }

    /// A controller with the given configuration and no registered definitions.
    pub fn with_config(store: S, config: ControllerConfig) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(store)
        })
    }

    /// Start building a controller over `store`.
    pub fn builder(store: S) -> ModelControllerBuilder<S> {
        ModelControllerBuilder::new(store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl ModelController<InMemoryStore> {
    /// An in-memory controller with the security realm definitions registered.
    pub fn with_standard_definitions() -> Result<Self, BuildError> {
        ModelControllerBuilder::new(InMemoryStore::new())
            .with_standard_definitions()?
            .build()
    }
}

/// One async mutex per address, created on demand and dropped when idle.
#[derive(Debug, Default)]
pub(super) struct PathLocks {
    locks: Mutex<HashMap<ResourcePath, Arc<AsyncMutex<()>>>>,
}

impl PathLocks {
    /// Lock every address, in address order so that a parent is always
    /// locked before its children.
    pub(super) async fn acquire(
        &self,
        mut addresses: Vec<ResourcePath>,
    ) -> Vec<OwnedMutexGuard<()>> {
        addresses.sort();
        addresses.dedup();

        let mut guards = Vec::with_capacity(addresses.len());
        for address in addresses {
            let lock = self.lock_for(address);
            guards.push(lock.lock_owned().await);
        }
        guards
    }

    fn lock_for(&self, address: ResourcePath) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(address).or_default())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
