//! Remove: delete a leaf resource. No schema validation applies.

use crate::error::{ControllerError, ControllerResult};
use crate::pipeline::{OperationContext, Stage};

pub fn register(context: &mut OperationContext) -> ControllerResult<()> {
    context.add_step(Stage::Model, "remove", |ctx| {
        ctx.read_resource()?;

        let children = &ctx.snapshot().children;
        if !children.is_empty() {
            let names: Vec<String> = children.iter().map(ToString::to_string).collect();
            return Err(ControllerError::invalid_operation(
                "remove",
                format!("{} has children: {}", ctx.address(), names.join(", ")),
            ));
        }

        ctx.stage_removal()?;
        if ctx.definition().restart_on_remove() {
            super::register_restart_required(ctx, "remove")?;
        }
        ctx.step_completed();
        Ok(())
    })
}
