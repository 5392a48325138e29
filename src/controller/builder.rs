//! Configuration and builder for model controller instances.

use super::core::ModelController;
use crate::error::BuildError;
use crate::resource::ResourceDefinition;
use crate::security;
use crate::storage::ModelStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Behavior switches of a [`ModelController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    /// Fail proposals carrying attributes the schema does not declare.
    /// When false they are silently dropped.
    pub reject_unknown_attributes: bool,

    /// Whether reads materialize defaults unless the request says otherwise.
    pub include_defaults: bool,

    /// Upper bound on steps executed per stage of one operation.
    pub max_steps_per_stage: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            reject_unknown_attributes: true,
            include_defaults: true,
            max_steps_per_stage: 64,
        }
    }
}

impl ControllerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_steps_per_stage == 0 {
            return Err(BuildError::InvalidConfiguration {
                message: "max_steps_per_stage must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for configuring and creating model controllers.
///
/// # Examples
///
/// ```rust
/// use model_controller::controller::{ControllerConfig, ModelControllerBuilder};
/// use model_controller::storage::InMemoryStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let controller = ModelControllerBuilder::new(InMemoryStore::new())
///     .with_config(ControllerConfig {
///         reject_unknown_attributes: false,
///         ..ControllerConfig::default()
///     })
///     .with_standard_definitions()?
///     .build()?;
///
/// assert!(!controller.config().reject_unknown_attributes);
/// # Ok(())
/// # }
/// ```
pub struct ModelControllerBuilder<S> {
    store: S,
    config: ControllerConfig,
    definitions: Vec<Arc<ResourceDefinition>>,
}

impl<S: ModelStore> ModelControllerBuilder<S> {
    /// Start with default configuration and no definitions.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: ControllerConfig::default(),
            definitions: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn reject_unknown_attributes(mut self, reject: bool) -> Self {
        self.config.reject_unknown_attributes = reject;
        self
    }

    pub fn include_defaults(mut self, include: bool) -> Self {
        self.config.include_defaults = include;
        self
    }

    pub fn max_steps_per_stage(mut self, max_steps: usize) -> Self {
        self.config.max_steps_per_stage = max_steps;
        self
    }

    /// Register a resource definition. Duplicates are reported by [`build`](Self::build).
    pub fn register_definition(mut self, definition: Arc<ResourceDefinition>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Register the security realm definitions.
    pub fn with_standard_definitions(mut self) -> Result<Self, BuildError> {
        self.definitions.extend(security::standard_definitions()?);
        Ok(self)
    }

    /// Validate the configuration and register every definition.
    ///
    /// # Errors
    ///
    /// Returns a `BuildError` if the configuration is invalid or two
    /// definitions share an address pattern.
    pub fn build(self) -> Result<ModelController<S>, BuildError> {
        let mut controller = ModelController::with_config(self.store, self.config)?;
        for definition in self.definitions {
            controller.register_definition(definition)?;
        }
        Ok(controller)
    }
}
