//! Staged execution of management operations.
//!
//! Every operation runs as an ordered queue of steps in two stages. All
//! `Model` steps run first and only validate and stage; if every one of them
//! succeeds the staged change is committed, and then the `Runtime` steps run.
//! A failure anywhere in the `Model` stage leaves the store untouched.
//!
//! ```text
//! Pending -> ModelValidating -> ModelCommitted -> RuntimeApplying -> Complete
//!                  \________________ Failed ________________/
//! ```
//!
//! # Examples
//!
//! ```rust
//! use model_controller::operation_handler::ModelOperation;
//! use model_controller::pipeline::{OperationContext, PipelineState, Stage, TreeSnapshot};
//! use model_controller::security;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let address = "/security-realm=R/authorization=ldap".parse()?;
//! let operation = ModelOperation::read_resource_description(address);
//! let mut context = OperationContext::new(
//!     operation,
//!     security::ldap_authorization_definition()?,
//!     TreeSnapshot::default(),
//! );
//!
//! context.add_step(Stage::Model, "check", |ctx| {
//!     ctx.step_completed();
//!     Ok(())
//! })?;
//! context.run_stage(Stage::Model)?;
//! assert!(context.commit()?.is_none());
//! context.run_stage(Stage::Runtime)?;
//! assert_eq!(context.state(), PipelineState::Complete);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod step;


pub use context::{OperationContext, PipelineState, StagedChange, TreeSnapshot};
pub use step::{Stage, Step};
