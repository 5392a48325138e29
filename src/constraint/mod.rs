//! Cross-attribute constraints.
//!
//! Per-attribute checks live on the schema. The rules here relate two or more
//! attributes of the same resource, for example "if `group` is defined then
//! `pattern` must be defined". They are evaluated against the
//! [`EffectiveMap`] so that a materialized default can satisfy a dependency.
//!
//! Rules run in declaration order and the first violated rule is the error
//! reported to the caller.

use crate::error::{BuildError, ValidationError, ValidationResult};
use crate::schema::{AttributeSchema, EffectiveMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Predicate signature for rules that cannot be expressed declaratively.
pub type ConstraintFn = dyn Fn(&EffectiveMap) -> ValidationResult<()> + Send + Sync;

/// A single cross-attribute rule.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConstraintRule {
    /// If `attribute` is defined, `requires` must be defined too.
    Requires { attribute: String, requires: String },

    /// Arbitrary predicate over the effective map.
    #[serde(skip)]
    Predicate {
        name: String,
        check: Arc<ConstraintFn>,
    },
}

impl ConstraintRule {
    pub fn requires(attribute: impl Into<String>, requires: impl Into<String>) -> Self {
        Self::Requires {
            attribute: attribute.into(),
            requires: requires.into(),
        }
    }

    pub fn predicate<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&EffectiveMap) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self::Predicate {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Evaluate the rule.
    pub fn check(&self, effective: &EffectiveMap) -> ValidationResult<()> {
        match self {
            ConstraintRule::Requires {
                attribute,
                requires,
            } => {
                if effective.is_defined(attribute) && !effective.is_defined(requires) {
                    Err(ValidationError::dependency(requires, attribute))
                } else {
                    Ok(())
                }
            }
            ConstraintRule::Predicate { check, .. } => check(effective),
        }
    }
}

impl fmt::Debug for ConstraintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintRule::Requires {
                attribute,
                requires,
            } => f
                .debug_struct("Requires")
                .field("attribute", attribute)
                .field("requires", requires)
                .finish(),
            ConstraintRule::Predicate { name, .. } => {
                f.debug_struct("Predicate").field("name", name).finish()
            }
        }
    }
}

/// Ordered cross-attribute rules for one resource type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet {
    rules: Vec<ConstraintRule>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; rules run in the order they were added.
    pub fn with_rule(mut self, rule: ConstraintRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ConstraintRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, stopping at the first violation.
    pub fn check(&self, effective: &EffectiveMap) -> ValidationResult<()> {
        self.rules.iter().try_for_each(|rule| rule.check(effective))
    }

    /// Check that declarative rules only mention attributes of `schema`.
    pub fn verify_against(&self, schema: &AttributeSchema) -> Result<(), BuildError> {
        for rule in &self.rules {
            if let ConstraintRule::Requires {
                attribute,
                requires,
            } = rule
            {
                for name in [attribute, requires] {
                    if !schema.declares(name) {
                        return Err(BuildError::UnknownConstraintAttribute {
                            schema: schema.id().to_string(),
                            attribute: name.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<ConstraintRule> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = ConstraintRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
