//! Error types for management model operations.
//!
//! Errors fall into two families. [`ValidationError`] covers every way a
//! proposed attribute map can be rejected; these are input errors the caller
//! fixes by resubmitting. [`ControllerError`] wraps those and adds the
//! resource-tree and pipeline failures. A [`ControllerError::PipelineIntegrity`]
//! is a handler authoring defect and is never a user input problem.

use crate::resource::path::ResourcePath;
use crate::storage::StorageError;

/// Main error type for model controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The proposed attribute state was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A resource already exists at the target address
    #[error("Duplicate resource {address}")]
    ResourceAlreadyExists { address: ResourcePath },

    /// No resource exists at the target address
    #[error("Resource not found: {address}")]
    ResourceNotFound { address: ResourcePath },

    /// No resource definition is registered for the address
    #[error("No resource definition is registered for address {address}")]
    NoResourceDefinition { address: ResourcePath },

    /// The operation is not valid against the current tree
    #[error("Invalid operation '{operation}': {message}")]
    InvalidOperation { operation: String, message: String },

    /// The stored model changed since the caller read it
    #[error("Version mismatch for {address}: expected {expected}, current {current}")]
    VersionMismatch {
        address: ResourcePath,
        expected: String,
        current: String,
    },

    /// Backing store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A pipeline step broke the completion contract
    #[error("Pipeline integrity error: {message}")]
    PipelineIntegrity { message: String },
}

/// Validation errors raised while checking a proposed attribute map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing and has no default
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute value has the wrong type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidAttributeType {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Attribute value rejected by its validator
    #[error("Attribute '{attribute}' has an invalid value: {reason}")]
    InvalidAttributeValue { attribute: String, reason: String },

    /// Two mutually exclusive attributes are both defined
    #[error("Attributes '{attribute}' and '{alternative}' are alternatives and cannot both be defined")]
    ConflictingAlternatives {
        attribute: String,
        alternative: String,
    },

    /// A cross-attribute dependency is not satisfied
    #[error("'{attribute}' can not be undefined while '{required_by}' is defined")]
    DependencyViolation {
        attribute: String,
        required_by: String,
    },

    /// Attribute not declared by the schema
    #[error("Unknown attribute '{attribute}' for resource type '{resource_type}'")]
    UnknownAttribute {
        attribute: String,
        resource_type: String,
    },

    /// General validation error with custom message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}

/// Errors raised while building schemas, definitions or the controller.
///
/// These are programming errors and should surface during startup.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Two attributes share a name
    #[error("Duplicate attribute '{attribute}' in schema '{schema}'")]
    DuplicateAttribute { schema: String, attribute: String },

    /// An alternative references an undeclared attribute
    #[error("Attribute '{attribute}' in schema '{schema}' names unknown alternative '{alternative}'")]
    UnknownAlternative {
        schema: String,
        attribute: String,
        alternative: String,
    },

    /// A default value does not satisfy its own definition
    #[error("Default for attribute '{attribute}' is invalid: {source}")]
    InvalidDefault {
        attribute: String,
        #[source]
        source: ValidationError,
    },

    /// A constraint references an undeclared attribute
    #[error("Constraint in schema '{schema}' references unknown attribute '{attribute}'")]
    UnknownConstraintAttribute { schema: String, attribute: String },

    /// A definition for the same path pattern is already registered
    #[error("A resource definition is already registered for '{pattern}'")]
    DuplicateDefinition { pattern: String },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Schema could not be parsed
    #[error("Failed to load schema: {message}")]
    SchemaLoad { message: String },
}

impl ControllerError {
    /// Create a resource not found error
    pub fn resource_not_found(address: &ResourcePath) -> Self {
        Self::ResourceNotFound {
            address: address.clone(),
        }
    }

    /// Create a duplicate resource error
    pub fn resource_already_exists(address: &ResourcePath) -> Self {
        Self::ResourceAlreadyExists {
            address: address.clone(),
        }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a pipeline integrity error
    pub fn pipeline_integrity(message: impl Into<String>) -> Self {
        Self::PipelineIntegrity {
            message: message.into(),
        }
    }

    /// Whether the caller can correct this error by resubmitting a different operation.
    ///
    /// Storage and pipeline integrity failures are not caused by the input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::PipelineIntegrity { .. })
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            _ => None,
        }
    }
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttributeValue {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Create a dependency violation error
    pub fn dependency(attribute: impl Into<String>, required_by: impl Into<String>) -> Self {
        Self::DependencyViolation {
            attribute: attribute.into(),
            required_by: required_by.into(),
        }
    }

    /// Create a custom validation error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// The attribute the error is reported against, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredAttribute { attribute }
            | Self::InvalidAttributeType { attribute, .. }
            | Self::InvalidAttributeValue { attribute, .. }
            | Self::ConflictingAlternatives { attribute, .. }
            | Self::DependencyViolation { attribute, .. }
            | Self::UnknownAttribute { attribute, .. } => Some(attribute),
            Self::Custom { .. } => None,
        }
    }
}

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
