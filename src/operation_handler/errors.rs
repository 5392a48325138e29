//! Error response creation shared by every operation.

use crate::error::{ControllerError, ValidationError};
use crate::operation_handler::core::{OperationResponse, ResponseHeaders};

/// Stable error code for a controller error.
pub fn error_code(error: &ControllerError) -> &'static str {
    match error {
        ControllerError::Validation(ValidationError::UnknownAttribute { .. }) => {
            "UNKNOWN_ATTRIBUTE"
        }
        ControllerError::Validation(_) => "VALIDATION_ERROR",
        ControllerError::ResourceAlreadyExists { .. } => "DUPLICATE_RESOURCE",
        ControllerError::ResourceNotFound { .. } => "RESOURCE_NOT_FOUND",
        ControllerError::NoResourceDefinition { .. } => "NO_RESOURCE_DEFINITION",
        ControllerError::InvalidOperation { .. } => "INVALID_OPERATION",
        ControllerError::VersionMismatch { .. } => "VERSION_MISMATCH",
        ControllerError::Storage(_) => "STORAGE_ERROR",
        ControllerError::PipelineIntegrity { .. } => "PIPELINE_INTEGRITY_ERROR",
    }
}

/// Create an error response from a ControllerError.
pub fn create_error_response(error: ControllerError, request_id: String) -> OperationResponse {
    let response_headers = match &error {
        ControllerError::VersionMismatch { current, .. } => ResponseHeaders {
            restart_required: false,
            version: Some(current.clone()),
        },
        _ => ResponseHeaders::default(),
    };

    OperationResponse {
        success: false,
        result: None,
        failure_description: Some(error.to_string()),
        error_code: Some(error_code(&error).to_string()),
        response_headers,
        request_id,
    }
}
