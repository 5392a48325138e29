//! Resource definition registration and lookup.

use super::core::ModelController;
use crate::error::{BuildError, ControllerError, ControllerResult};
use crate::resource::{ResourceDefinition, ResourcePath};
use crate::storage::ModelStore;
use log::debug;
use std::sync::Arc;

impl<S: ModelStore> ModelController<S> {
    /// Register a resource definition under its address pattern.
    pub fn register_definition(
        &mut self,
        definition: Arc<ResourceDefinition>,
    ) -> Result<(), BuildError> {
        if self
            .definitions
            .iter()
            .any(|existing| existing.pattern() == definition.pattern())
        {
            return Err(BuildError::DuplicateDefinition {
                pattern: definition.pattern().to_string(),
            });
        }

        debug!(
            "Registered resource definition '{}' for {}",
            definition.schema().id(),
            definition.pattern()
        );
        self.definitions.push(definition);
        Ok(())
    }

    /// All registered definitions in registration order.
    pub fn definitions(&self) -> &[Arc<ResourceDefinition>] {
        &self.definitions
    }

    /// The definition governing `address`.
    ///
    /// When several patterns match, the one with the fewest wildcards wins.
    pub fn find_definition(
        &self,
        address: &ResourcePath,
    ) -> ControllerResult<Arc<ResourceDefinition>> {
        self.definitions
            .iter()
            .filter(|definition| definition.applies_to(address))
            .min_by_key(|definition| wildcard_count(definition.pattern()))
            .cloned()
            .ok_or_else(|| ControllerError::NoResourceDefinition {
                address: address.clone(),
            })
    }
}

fn wildcard_count(pattern: &ResourcePath) -> usize {
    pattern
        .elements()
        .iter()
        .filter(|element| element.is_wildcard())
        .count()
}
