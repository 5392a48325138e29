//! WriteAttribute and UndefineAttribute.
//!
//! The merged state is validated as a whole before the generic write runs, so
//! clearing an attribute another defined attribute depends on is rejected just
//! as the same state would be rejected on add.

use super::attribute_name;
use crate::error::{ControllerResult, ValidationError};
use crate::operation_handler::core::OperationType;
use crate::pipeline::{OperationContext, Stage};
use serde_json::Value;

/// Enqueue the merged-state validation step, then the generic write step.
pub fn register(context: &mut OperationContext) -> ControllerResult<()> {
    let name = attribute_name(context)?;
    let value = match context.operation().operation {
        OperationType::UndefineAttribute => Value::Null,
        _ => context.operation().value.clone().unwrap_or(Value::Null),
    };

    let validate_name = name.clone();
    let validate_value = value.clone();
    context.add_step(Stage::Model, "validate-attribute-combination", move |ctx| {
        let schema = ctx.definition().schema();
        if ctx.reject_unknown() && !schema.declares(&validate_name) {
            return Err(ValidationError::UnknownAttribute {
                attribute: validate_name,
                resource_type: schema.id().to_string(),
            }
            .into());
        }

        let merged = ctx.read_resource()?.merged_with(&validate_name, validate_value);
        ctx.definition().validate_model(&merged, ctx.reject_unknown())?;
        ctx.step_completed();
        Ok(())
    })?;

    context.add_step(Stage::Model, "write-attribute", move |ctx| write(ctx, &name, value))
}

fn write(ctx: &mut OperationContext, name: &str, value: Value) -> ControllerResult<()> {
    // Tolerated undeclared attributes are never stored, as on add.
    if !ctx.definition().schema().declares(name) {
        ctx.read_resource()?;
        ctx.step_completed();
        return Ok(());
    }

    let current = ctx.read_resource()?;
    let previous = current.get(name).cloned();
    let updated = current.with_attributes(current.merged_with(name, value));
    let changed = updated.get(name) != previous.as_ref();
    ctx.stage_model(updated)?;

    let restart_impact = ctx
        .definition()
        .schema()
        .attribute(name)
        .is_some_and(|attr| attr.restart_required);
    if changed && restart_impact {
        super::register_restart_required(ctx, "write-attribute")?;
    }

    ctx.step_completed();
    Ok(())
}
