//! Transport-agnostic management operations.
//!
//! This module provides structured request/response types for management
//! operations and the handlers that turn each request into pipeline steps.
//!
//! # Key Types
//!
//! - [`ModelOperation`] - Structured request with builder constructors
//! - [`OperationResponse`] - Outcome, result, error code and response headers
//! - [`ResponseHeaders`] - Restart-required flag and resulting content version
//!
//! # Examples
//!
//! ```rust,no_run
//! use model_controller::controller::ModelController;
//! use model_controller::operation_handler::ModelOperation;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ModelController::with_standard_definitions()?;
//! let address = "/security-realm=ManagementRealm/authorization=ldap".parse()?;
//!
//! let request = ModelOperation::write_attribute(address, "group", json!(2));
//! let response = controller.execute(request).await;
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
pub mod handlers;

pub use core::{ModelOperation, OperationResponse, OperationType, ResponseHeaders};

pub use errors::{create_error_response, error_code};
