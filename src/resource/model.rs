//! Stored state of one resource instance.

use super::path::ResourcePath;
use super::version::ModelVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The persisted attribute state of one resource, addressed by its path.
///
/// Only explicitly defined attributes are stored; defaults are materialized
/// when the model is validated or read with defaults included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceModel {
    address: ResourcePath,
    attributes: Map<String, Value>,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl ResourceModel {
    /// A new model; `null` attribute values are dropped.
    pub fn new(address: ResourcePath, attributes: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            address,
            attributes: defined_only(attributes),
            created: now,
            last_modified: now,
        }
    }

    pub fn address(&self) -> &ResourcePath {
        &self.address
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// The attribute value if it is defined.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Content version of the stored attributes.
    pub fn version(&self) -> ModelVersion {
        ModelVersion::of(&self.attributes)
    }

    /// The attribute map with one attribute overwritten; `null` undefines it.
    pub fn merged_with(&self, name: &str, value: Value) -> Map<String, Value> {
        let mut merged = self.attributes.clone();
        if value.is_null() {
            merged.remove(name);
        } else {
            merged.insert(name.to_string(), value);
        }
        merged
    }

    /// A copy of this model carrying a replaced attribute map.
    pub fn with_attributes(&self, attributes: Map<String, Value>) -> Self {
        Self {
            address: self.address.clone(),
            attributes: defined_only(attributes),
            created: self.created,
            last_modified: Utc::now(),
        }
    }

    /// JSON view of the stored attributes.
    pub fn to_value(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}

fn defined_only(attributes: Map<String, Value>) -> Map<String, Value> {
    attributes
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect()
}
