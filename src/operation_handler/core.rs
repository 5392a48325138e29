//! Core operation types
//!
//! This module contains the transport-agnostic request and response types for
//! management operations. Requests are dispatched by
//! [`ModelController::execute`](crate::controller::ModelController::execute).

use crate::resource::{ModelVersion, ResourcePath};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured request for a management operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOperation {
    /// The type of operation to perform
    pub operation: OperationType,
    /// Target resource address
    pub address: ResourcePath,
    /// Full attribute proposal for add operations; must be a JSON object
    pub attributes: Option<Value>,
    /// Attribute name for single-attribute operations
    pub name: Option<String>,
    /// Attribute value for write operations; `null` clears the attribute
    pub value: Option<Value>,
    /// Whether reads materialize defaults; falls back to controller config
    pub include_defaults: Option<bool>,
    /// Expected content version for conditional operations
    pub expected_version: Option<ModelVersion>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Types of management operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    /// Create a resource from a full attribute proposal
    Add,
    /// Delete a resource
    Remove,
    /// Set one attribute of an existing resource
    WriteAttribute,
    /// Clear one attribute of an existing resource
    UndefineAttribute,
    /// Read every attribute of a resource
    ReadResource,
    /// Read one attribute of a resource
    ReadAttribute,
    /// Describe the attributes a resource accepts
    ReadResourceDescription,
}

impl OperationType {
    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Add => "add",
            OperationType::Remove => "remove",
            OperationType::WriteAttribute => "write-attribute",
            OperationType::UndefineAttribute => "undefine-attribute",
            OperationType::ReadResource => "read-resource",
            OperationType::ReadAttribute => "read-attribute",
            OperationType::ReadResourceDescription => "read-resource-description",
        }
    }

    /// Whether the operation can change the stored tree.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            OperationType::Add
                | OperationType::Remove
                | OperationType::WriteAttribute
                | OperationType::UndefineAttribute
        )
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured response from a management operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// The value returned by the operation
    pub result: Option<Value>,
    /// Error message if the operation failed
    pub failure_description: Option<String>,
    /// Error code for programmatic handling
    pub error_code: Option<String>,
    /// Headers describing the operation's effect
    pub response_headers: ResponseHeaders,
    /// Request ID for tracing
    pub request_id: String,
}

/// Effects of an operation reported alongside its result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResponseHeaders {
    /// Dependent services must restart before the change takes effect
    pub restart_required: bool,
    /// Content version of the target resource after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl OperationResponse {
    /// Successful response carrying `result`.
    pub fn success(
        result: Option<Value>,
        response_headers: ResponseHeaders,
        request_id: String,
    ) -> Self {
        Self {
            success: true,
            result,
            failure_description: None,
            error_code: None,
            response_headers,
            request_id,
        }
    }

    /// Render the response the way it would be written to a client.
    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "outcome".to_string(),
            Value::String(if self.success { "success" } else { "failed" }.to_string()),
        );
        if let Some(result) = &self.result {
            body.insert("result".to_string(), result.clone());
        }
        if let Some(description) = &self.failure_description {
            body.insert(
                "failure-description".to_string(),
                Value::String(description.clone()),
            );
        }
        if let Some(code) = &self.error_code {
            body.insert("error-code".to_string(), Value::String(code.clone()));
        }
        if let Ok(headers) = serde_json::to_value(&self.response_headers) {
            body.insert("response-headers".to_string(), headers);
        }
        body.insert(
            "request-id".to_string(),
            Value::String(self.request_id.clone()),
        );
        Value::Object(body)
    }
}
