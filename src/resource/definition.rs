//! Resource definitions: what each resource type contributes to the tree.
//!
//! A resource type supplies data, not behavior: an address pattern, an
//! [`AttributeSchema`], a [`ConstraintSet`] and restart flags. The generic
//! add, write-attribute and remove handlers are parameterized by this value.

use super::path::ResourcePath;
use crate::constraint::ConstraintSet;
use crate::error::{BuildError, ValidationResult};
use crate::schema::{AttributeSchema, EffectiveMap};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Schema, constraints and flags registered for an address pattern.
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pattern: ResourcePath,
    schema: Arc<AttributeSchema>,
    constraints: ConstraintSet,
    restart_on_add: bool,
    restart_on_remove: bool,
}

impl ResourceDefinition {
    /// Start building a definition for `pattern`.
    pub fn builder(
        pattern: ResourcePath,
        schema: Arc<AttributeSchema>,
    ) -> ResourceDefinitionBuilder {
        ResourceDefinitionBuilder {
            pattern,
            schema,
            constraints: ConstraintSet::new(),
            restart_on_add: false,
            restart_on_remove: false,
        }
    }

    /// Address pattern the definition is registered under.
    pub fn pattern(&self) -> &ResourcePath {
        &self.pattern
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Whether adding a resource requires dependent services to restart.
    pub fn restart_on_add(&self) -> bool {
        self.restart_on_add
    }

    /// Whether removing a resource requires dependent services to restart.
    pub fn restart_on_remove(&self) -> bool {
        self.restart_on_remove
    }

    /// Whether the definition applies to `address`.
    pub fn applies_to(&self, address: &ResourcePath) -> bool {
        self.pattern.matches(address)
    }

    /// Per-attribute validation followed by the cross-attribute rules.
    ///
    /// Add and write-attribute both call this with the full proposed state,
    /// so a resource is held to the same rules whichever way it was reached.
    pub fn validate_model(
        &self,
        proposed: &Map<String, Value>,
        reject_unknown: bool,
    ) -> ValidationResult<EffectiveMap> {
        let effective = self.schema.validate_with(proposed, reject_unknown)?;
        self.constraints.check(&effective)?;
        Ok(effective)
    }
}

/// Builder for [`ResourceDefinition`].
#[derive(Debug)]
pub struct ResourceDefinitionBuilder {
    pattern: ResourcePath,
    schema: Arc<AttributeSchema>,
    constraints: ConstraintSet,
    restart_on_add: bool,
    restart_on_remove: bool,
}

impl ResourceDefinitionBuilder {
    pub fn constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Flag add and remove as requiring dependent services to restart.
    pub fn restart_on_add_remove(mut self) -> Self {
        self.restart_on_add = true;
        self.restart_on_remove = true;
        self
    }

    /// Check constraint references against the schema and build.
    pub fn build(self) -> Result<ResourceDefinition, BuildError> {
        if self.pattern.is_root() {
            return Err(BuildError::InvalidConfiguration {
                message: "a resource definition cannot be registered for the root address"
                    .to_string(),
            });
        }
        self.constraints.verify_against(&self.schema)?;

        Ok(ResourceDefinition {
            pattern: self.pattern,
            schema: self.schema,
            constraints: self.constraints,
            restart_on_add: self.restart_on_add,
            restart_on_remove: self.restart_on_remove,
        })
    }
}
