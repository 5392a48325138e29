//! Read handlers. They stage nothing, so committing them is a no-op.

use super::attribute_name;
use crate::error::{ControllerError, ControllerResult, ValidationError};
use crate::pipeline::{OperationContext, Stage};
use serde_json::{Map, Value};

pub fn register_read_resource(context: &mut OperationContext) -> ControllerResult<()> {
    context.add_step(Stage::Model, "read-resource", |ctx| {
        let attributes = if include_defaults(ctx) {
            with_defaults(ctx)?
        } else {
            ctx.read_resource()?.attributes().clone()
        };
        ctx.set_result(Value::Object(attributes));
        ctx.step_completed();
        Ok(())
    })
}

pub fn register_read_attribute(context: &mut OperationContext) -> ControllerResult<()> {
    let name = attribute_name(context)?;
    context.add_step(Stage::Model, "read-attribute", move |ctx| {
        let schema = ctx.definition().schema();
        if !schema.declares(&name) {
            return Err(ValidationError::UnknownAttribute {
                attribute: name,
                resource_type: schema.id().to_string(),
            }
            .into());
        }

        let value = if include_defaults(ctx) {
            with_defaults(ctx)?.remove(&name)
        } else {
            ctx.read_resource()?.get(&name).cloned()
        };
        ctx.set_result(value.unwrap_or(Value::Null));
        ctx.step_completed();
        Ok(())
    })
}

pub fn register_read_description(context: &mut OperationContext) -> ControllerResult<()> {
    context.add_step(Stage::Model, "read-resource-description", |ctx| {
        let definition = ctx.definition();
        let mut description = match serde_json::to_value(definition.schema()) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                return Err(ControllerError::invalid_operation(
                    "read-resource-description",
                    e.to_string(),
                ));
            }
        };
        description.insert(
            "pattern".to_string(),
            Value::String(definition.pattern().to_string()),
        );
        description.insert(
            "restartOnAdd".to_string(),
            Value::Bool(definition.restart_on_add()),
        );
        description.insert(
            "restartOnRemove".to_string(),
            Value::Bool(definition.restart_on_remove()),
        );

        ctx.set_result(Value::Object(description));
        ctx.step_completed();
        Ok(())
    })
}

fn include_defaults(ctx: &OperationContext) -> bool {
    ctx.operation().include_defaults.unwrap_or(true)
}

fn with_defaults(ctx: &OperationContext) -> ControllerResult<Map<String, Value>> {
    let stored = ctx.read_resource()?;
    let effective = ctx.definition().schema().validate_with(stored.attributes(), false)?;
    Ok(effective.into_map())
}
