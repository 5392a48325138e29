//! Builder methods for [`ModelOperation`].

use crate::operation_handler::core::{ModelOperation, OperationType};
use crate::resource::{ModelVersion, ResourcePath};
use serde_json::Value;

impl ModelOperation {
    fn new(operation: OperationType, address: ResourcePath) -> Self {
        Self {
            operation,
            address,
            attributes: None,
            name: None,
            value: None,
            include_defaults: None,
            expected_version: None,
            request_id: None,
        }
    }

    /// Create a new add operation request.
    ///
    /// `attributes` must be a JSON object; anything else fails validation.
    pub fn add(address: ResourcePath, attributes: Value) -> Self {
        Self {
            attributes: Some(attributes),
            ..Self::new(OperationType::Add, address)
        }
    }

    /// Create a new remove operation request.
    pub fn remove(address: ResourcePath) -> Self {
        Self::new(OperationType::Remove, address)
    }

    /// Create a new write-attribute operation request.
    pub fn write_attribute(address: ResourcePath, name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value),
            ..Self::new(OperationType::WriteAttribute, address)
        }
    }

    /// Create a new undefine-attribute operation request.
    pub fn undefine_attribute(address: ResourcePath, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(OperationType::UndefineAttribute, address)
        }
    }

    /// Create a new read-resource operation request.
    pub fn read_resource(address: ResourcePath) -> Self {
        Self::new(OperationType::ReadResource, address)
    }

    /// Create a new read-attribute operation request.
    pub fn read_attribute(address: ResourcePath, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(OperationType::ReadAttribute, address)
        }
    }

    /// Create a new read-resource-description operation request.
    pub fn read_resource_description(address: ResourcePath) -> Self {
        Self::new(OperationType::ReadResourceDescription, address)
    }

    /// Set whether reads materialize defaults.
    pub fn include_defaults(mut self, include_defaults: bool) -> Self {
        self.include_defaults = Some(include_defaults);
        self
    }

    /// Require the stored model to be at `version`.
    pub fn with_expected_version(mut self, version: ModelVersion) -> Self {
        self.expected_version = Some(version);
        self
    }

    /// Set a request ID for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
