//! Schema-driven validation and staged mutation of management resources.
//!
//! Resources live in a tree addressed by `(type, name)` paths such as
//! `/security-realm=ManagementRealm/authorization=ldap`. Each resource type
//! registers a definition: an attribute schema, cross-attribute constraints
//! and restart flags. Add and write operations validate the complete proposed
//! state against that definition in a staged pipeline before anything is
//! committed to the store.
//!
//! # Core Components
//!
//! - [`ModelController`] - Runs operations against a [`ModelStore`]
//! - [`AttributeSchema`] - Per-attribute types, defaults, validators and alternatives
//! - [`ConstraintSet`] - Cross-attribute dependency rules
//! - [`OperationContext`] - The staged `Model`/`Runtime` step pipeline
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use model_controller::{ModelController, ModelOperation};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ModelController::with_standard_definitions()?;
//! let realm = "/security-realm=ManagementRealm".parse()?;
//! let ldap = "/security-realm=ManagementRealm/authorization=ldap".parse()?;
//!
//! controller.execute(ModelOperation::add(realm, json!({}))).await;
//! let response = controller
//!     .execute(ModelOperation::add(ldap, json!({"group": 1})))
//!     .await;
//!
//! // `group` requires `pattern`
//! assert_eq!(response.error_code.as_deref(), Some("VALIDATION_ERROR"));
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod controller;
pub mod error;
pub mod operation_handler;
pub mod pipeline;
pub mod resource;
pub mod schema;
pub mod security;
pub mod storage;

// Re-export commonly used types for convenience
pub use constraint::{ConstraintRule, ConstraintSet};
pub use controller::{ControllerConfig, ModelController, ModelControllerBuilder, OperationOutcome};
pub use error::{BuildError, ControllerError, ControllerResult, ValidationError, ValidationResult};
pub use operation_handler::{ModelOperation, OperationResponse, OperationType, ResponseHeaders};
pub use pipeline::{OperationContext, PipelineState, Stage};
pub use resource::{ModelVersion, ResourceDefinition, ResourceModel, ResourcePath};
pub use schema::{AttributeDefinition, AttributeSchema, AttributeType, EffectiveMap, SchemaRegistry};
pub use storage::{InMemoryStore, ModelStore, StorageError};
