//! Add: create a resource from a full attribute proposal.

use crate::error::{ControllerError, ControllerResult, ValidationError, ValidationResult};
use crate::pipeline::{OperationContext, Stage};
use crate::resource::ResourceModel;
use serde_json::{Map, Value};

/// Enqueue validation of the proposal followed by population of the new model.
pub fn register(context: &mut OperationContext) -> ControllerResult<()> {
    context.add_step(Stage::Model, "validate-add", |ctx| {
        let snapshot = ctx.snapshot();
        if snapshot.current.is_some() {
            return Err(ControllerError::resource_already_exists(ctx.address()));
        }
        if !snapshot.parent_exists {
            let parent = ctx.address().parent().unwrap_or_default();
            return Err(ControllerError::resource_not_found(&parent));
        }

        ctx.definition()
            .validate_model(&proposal(ctx)?, ctx.reject_unknown())?;
        ctx.step_completed();
        Ok(())
    })?;

    context.add_step(Stage::Model, "populate-model", |ctx| {
        let attributes = declared_only(ctx, proposal(ctx)?);
        let model = ResourceModel::new(ctx.address().clone(), attributes);
        ctx.stage_model(model)?;

        if ctx.definition().restart_on_add() {
            super::register_restart_required(ctx, "add")?;
        }
        ctx.step_completed();
        Ok(())
    })
}

/// The proposed attributes; an absent or `null` proposal is empty.
fn proposal(ctx: &OperationContext) -> ValidationResult<Map<String, Value>> {
    match &ctx.operation().attributes {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(ValidationError::custom("Attribute proposal must be a JSON object")),
    }
}

/// Undeclared attributes only reach here when the controller tolerates them;
/// they are never stored.
fn declared_only(ctx: &OperationContext, attributes: Map<String, Value>) -> Map<String, Value> {
    let schema = ctx.definition().schema();
    attributes
        .into_iter()
        .filter(|(name, _)| schema.declares(name))
        .collect()
}
