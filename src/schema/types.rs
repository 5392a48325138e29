//! Core schema type definitions for management resources.
//!
//! This module contains the data structures that describe one resource type's
//! attributes: their value type, whether they are required, their default,
//! the validator applied to explicit values, and mutual-exclusion
//! relationships between attributes.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An immutable catalog of attribute definitions for one resource type.
///
/// Construction checks that attribute names are unique and that every
/// alternative names another attribute of the same schema. Deserialized
/// schemas go through the same checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaDocument", into = "SchemaDocument")]
pub struct AttributeSchema {
    id: String,
    description: String,
    attributes: Vec<AttributeDefinition>,
}

/// Serialized form of an [`AttributeSchema`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SchemaDocument {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub attributes: Vec<AttributeDefinition>,
}

impl TryFrom<SchemaDocument> for AttributeSchema {
    type Error = BuildError;

    fn try_from(document: SchemaDocument) -> Result<Self, Self::Error> {
        AttributeSchema::new(document.id, document.attributes)
            .map(|schema| schema.with_description(document.description))
    }
}

impl From<AttributeSchema> for SchemaDocument {
    fn from(schema: AttributeSchema) -> Self {
        Self {
            id: schema.id,
            description: schema.description,
            attributes: schema.attributes,
        }
    }
}

impl AttributeSchema {
    /// Build a schema, checking name uniqueness, alternative references and defaults.
    pub fn new(
        id: impl Into<String>,
        attributes: Vec<AttributeDefinition>,
    ) -> Result<Self, BuildError> {
        let id = id.into();

        for (index, attr) in attributes.iter().enumerate() {
            if attributes[..index].iter().any(|a| a.name == attr.name) {
                return Err(BuildError::DuplicateAttribute {
                    schema: id,
                    attribute: attr.name.clone(),
                });
            }
        }

        for attr in &attributes {
            for alternative in &attr.alternatives {
                if alternative == &attr.name || !attributes.iter().any(|a| &a.name == alternative)
                {
                    return Err(BuildError::UnknownAlternative {
                        schema: id,
                        attribute: attr.name.clone(),
                        alternative: alternative.clone(),
                    });
                }
            }

            if let Some(default) = &attr.default_value {
                attr.check_value(default)
                    .map_err(|source| BuildError::InvalidDefault {
                        attribute: attr.name.clone(),
                        source,
                    })?;
            }
        }

        Ok(Self {
            id,
            description: String::new(),
            attributes,
        })
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The resource type identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attribute definitions in declaration order.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Look up an attribute definition by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Whether the schema declares an attribute with this name.
    pub fn declares(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Definition of a single resource attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,
    /// Value type of the attribute
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Whether an undefined value is an error
    #[serde(default)]
    pub required: bool,
    /// Value used when the attribute is not defined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Check applied to explicitly defined values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<AttributeValidator>,
    /// Attributes that may not be defined together with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    /// Changing the attribute requires dependent services to restart
    #[serde(default)]
    pub restart_required: bool,
    /// Element or attribute name used by the persistence layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_name: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl AttributeDefinition {
    /// Start building a definition.
    pub fn builder(
        name: impl Into<String>,
        data_type: AttributeType,
    ) -> AttributeDefinitionBuilder {
        AttributeDefinitionBuilder::new(name, data_type)
    }

    /// Name used by the persistence layer, falling back to the attribute name.
    pub fn xml_name(&self) -> &str {
        self.xml_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether `other` is declared as an alternative of this attribute.
    pub fn is_alternative(&self, other: &str) -> bool {
        self.alternatives.iter().any(|alt| alt == other)
    }
}

/// Attribute value types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    /// String value
    #[default]
    String,
    /// 64-bit signed integer
    Integer,
    /// Boolean value
    Boolean,
}

impl AttributeType {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::Boolean => "boolean",
        }
    }
}

/// Parameterized validators for defined attribute values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AttributeValidator {
    /// String length in characters within `min..=max`
    StringLength {
        min: usize,
        #[serde(default = "unbounded_length")]
        max: usize,
    },
    /// Integer within `min..=max`
    IntRange { min: i64, max: i64 },
    /// Value must equal one of the listed values
    AllowedValues { values: Vec<Value> },
}

fn unbounded_length() -> usize {
    usize::MAX
}

/// Fluent builder for [`AttributeDefinition`].
#[derive(Debug, Clone)]
pub struct AttributeDefinitionBuilder {
    definition: AttributeDefinition,
}

impl AttributeDefinitionBuilder {
    pub fn new(name: impl Into<String>, data_type: AttributeType) -> Self {
        Self {
            definition: AttributeDefinition {
                name: name.into(),
                data_type,
                required: false,
                default_value: None,
                validator: None,
                alternatives: Vec::new(),
                restart_required: false,
                xml_name: None,
                description: String::new(),
            },
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.definition.required = required;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.definition.default_value = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: AttributeValidator) -> Self {
        self.definition.validator = Some(validator);
        self
    }

    /// Require a non-empty string with no upper bound.
    pub fn min_length(self, min: usize) -> Self {
        self.validator(AttributeValidator::StringLength {
            min,
            max: usize::MAX,
        })
    }

    pub fn range(self, min: i64, max: i64) -> Self {
        self.validator(AttributeValidator::IntRange { min, max })
    }

    pub fn alternative(mut self, name: impl Into<String>) -> Self {
        self.definition.alternatives.push(name.into());
        self
    }

    pub fn restart_required(mut self) -> Self {
        self.definition.restart_required = true;
        self
    }

    pub fn xml_name(mut self, xml_name: impl Into<String>) -> Self {
        self.definition.xml_name = Some(xml_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = description.into();
        self
    }

    pub fn build(self) -> AttributeDefinition {
        self.definition
    }
}

/// An attribute map after defaults have been materialized.
///
/// Only defined values are kept; a JSON `null` never appears as a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveMap(Map<String, Value>);

impl EffectiveMap {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Whether the attribute has a defined value.
    pub fn is_defined(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|value| !value.is_null())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    /// Insert a value; `null` removes the attribute instead.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if value.is_null() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<EffectiveMap> for Value {
    fn from(map: EffectiveMap) -> Self {
        Value::Object(map.0)
    }
}
