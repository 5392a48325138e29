//! Step registration for each operation type.
//!
//! Handlers never touch the store. Each one enqueues the steps that validate
//! the request against the resource definition and stage the resulting change
//! on the [`OperationContext`]; the controller runs the stages and commits.

pub mod add;
pub mod read;
pub mod remove;
pub mod write_attribute;

use crate::error::{ControllerError, ControllerResult};
use crate::operation_handler::core::OperationType;
use crate::pipeline::{OperationContext, Stage};

/// Enqueue the steps for the context's operation.
pub fn register_steps(context: &mut OperationContext) -> ControllerResult<()> {
    if context.operation().expected_version.is_some() {
        register_version_check(context)?;
    }

    match context.operation().operation {
        OperationType::Add => add::register(context),
        OperationType::Remove => remove::register(context),
        OperationType::WriteAttribute | OperationType::UndefineAttribute => {
            write_attribute::register(context)
        }
        OperationType::ReadResource => read::register_read_resource(context),
        OperationType::ReadAttribute => read::register_read_attribute(context),
        OperationType::ReadResourceDescription => read::register_read_description(context),
    }
}

/// Fail before any validation when the stored model is not at the expected version.
fn register_version_check(context: &mut OperationContext) -> ControllerResult<()> {
    context.add_step(Stage::Model, "verify-version", |ctx| {
        if let Some(expected) = ctx.operation().expected_version.clone() {
            let current = ctx.read_resource()?.version();
            if current != expected {
                return Err(ControllerError::VersionMismatch {
                    address: ctx.address().clone(),
                    expected: expected.to_string(),
                    current: current.to_string(),
                });
            }
        }
        ctx.step_completed();
        Ok(())
    })
}

/// A runtime step that flags the response as requiring a restart.
pub(crate) fn register_restart_required(
    context: &mut OperationContext,
    name: &str,
) -> ControllerResult<()> {
    context.add_step(Stage::Runtime, format!("{}-restart-required", name), |ctx| {
        ctx.mark_restart_required();
        ctx.step_completed();
        Ok(())
    })
}

/// The attribute name carried by a single-attribute operation.
pub(crate) fn attribute_name(context: &OperationContext) -> ControllerResult<String> {
    context.operation().name.clone().ok_or_else(|| {
        ControllerError::invalid_operation(
            context.operation().operation.as_str(),
            "missing attribute name",
        )
    })
}
