//! Per-attribute validation of proposed attribute maps.
//!
//! [`AttributeSchema::validate`] is the single entry point used by both the
//! add and the write-attribute paths. It is a pure function of the schema and
//! the proposal: it type-checks and validates every defined value, enforces
//! required attributes and alternative exclusion, and returns the
//! [`EffectiveMap`] with defaults materialized for undefined attributes.

use super::types::{
    AttributeDefinition, AttributeSchema, AttributeType, AttributeValidator, EffectiveMap,
};
use crate::error::{ValidationError, ValidationResult};
use serde_json::{Map, Value};

impl AttributeSchema {
    /// Validate a proposal, rejecting attributes the schema does not declare.
    pub fn validate(&self, proposed: &Map<String, Value>) -> ValidationResult<EffectiveMap> {
        self.validate_with(proposed, true)
    }

    /// Validate a proposal given as a JSON value, which must be an object.
    pub fn validate_value(&self, proposed: &Value) -> ValidationResult<EffectiveMap> {
        let obj = proposed
            .as_object()
            .ok_or_else(|| ValidationError::custom("Attribute proposal must be a JSON object"))?;
        self.validate(obj)
    }

    /// Validate a proposal.
    ///
    /// When `reject_unknown` is false, undeclared attributes are dropped from
    /// the effective map instead of failing.
    pub fn validate_with(
        &self,
        proposed: &Map<String, Value>,
        reject_unknown: bool,
    ) -> ValidationResult<EffectiveMap> {
        let is_defined = |name: &str| proposed.get(name).is_some_and(|v| !v.is_null());
        let mut effective = EffectiveMap::new();

        for attr_def in self.attributes() {
            match proposed.get(&attr_def.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    attr_def.check_value(value)?;

                    if let Some(alternative) =
                        attr_def.alternatives.iter().find(|alt| is_defined(alt.as_str()))
                    {
                        return Err(ValidationError::ConflictingAlternatives {
                            attribute: attr_def.name.clone(),
                            alternative: alternative.clone(),
                        });
                    }

                    effective.insert(attr_def.name.clone(), value.clone());
                }
                None => {
                    let alternative_defined =
                        attr_def.alternatives.iter().any(|alt| is_defined(alt.as_str()));

                    match &attr_def.default_value {
                        Some(default) if !alternative_defined => {
                            effective.insert(attr_def.name.clone(), default.clone());
                        }
                        None if attr_def.required && !alternative_defined => {
                            return Err(ValidationError::missing_required(&attr_def.name));
                        }
                        _ => {}
                    }
                }
            }
        }

        if reject_unknown {
            if let Some(unknown) = proposed.keys().find(|name| !self.declares(name)) {
                return Err(ValidationError::UnknownAttribute {
                    attribute: unknown.clone(),
                    resource_type: self.id().to_string(),
                });
            }
        }

        Ok(effective)
    }
}

impl AttributeDefinition {
    /// Type-check a defined value and run the attribute's validator on it.
    pub fn check_value(&self, value: &Value) -> ValidationResult<()> {
        self.check_type(value)?;

        match &self.validator {
            Some(validator) => validator.check(&self.name, value),
            None => Ok(()),
        }
    }

    fn check_type(&self, value: &Value) -> ValidationResult<()> {
        let matches = match self.data_type {
            AttributeType::String => value.is_string(),
            AttributeType::Integer => value.is_i64(),
            AttributeType::Boolean => value.is_boolean(),
        };

        if matches {
            Ok(())
        } else {
            Err(ValidationError::InvalidAttributeType {
                attribute: self.name.clone(),
                expected: self.data_type.as_str().to_string(),
                actual: value_type_name(value).to_string(),
            })
        }
    }
}

impl AttributeValidator {
    /// Check a value already known to have the attribute's type.
    pub fn check(&self, attribute: &str, value: &Value) -> ValidationResult<()> {
        match self {
            AttributeValidator::StringLength { min, max } => {
                let Some(text) = value.as_str() else {
                    return Err(ValidationError::invalid_value(
                        attribute,
                        "length bounds apply to string values only",
                    ));
                };
                let length = text.chars().count();
                if length < *min {
                    return Err(ValidationError::invalid_value(
                        attribute,
                        format!("length {} is shorter than the minimum {}", length, min),
                    ));
                }
                if length > *max {
                    return Err(ValidationError::invalid_value(
                        attribute,
                        format!("length {} is longer than the maximum {}", length, max),
                    ));
                }
                Ok(())
            }
            AttributeValidator::IntRange { min, max } => {
                let Some(number) = value.as_i64() else {
                    return Err(ValidationError::invalid_value(
                        attribute,
                        "range bounds apply to integer values only",
                    ));
                };
                if number < *min || number > *max {
                    return Err(ValidationError::invalid_value(
                        attribute,
                        format!("{} is outside the range {}..={}", number, min, max),
                    ));
                }
                Ok(())
            }
            AttributeValidator::AllowedValues { values } => {
                if values.contains(value) {
                    Ok(())
                } else {
                    Err(ValidationError::invalid_value(
                        attribute,
                        format!("{} is not one of {:?}", value, values),
                    ))
                }
            }
        }
    }
}

/// Get the type name of a JSON value for error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
