//! Pipeline stages and the steps queued against them.

use super::context::OperationContext;
use crate::error::ControllerResult;
use std::fmt;

/// Execution stage of an operation.
///
/// Every `Model` step runs before any `Runtime` step, and the staged change
/// is committed between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Validates the request and stages the new persisted model.
    Model,
    /// Applies side effects of an already committed change.
    Runtime,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Model => write!(f, "MODEL"),
            Stage::Runtime => write!(f, "RUNTIME"),
        }
    }
}

pub(crate) type StepHandler =
    Box<dyn FnOnce(&mut OperationContext) -> ControllerResult<()> + Send>;

/// A named unit of work executed once within a stage.
pub struct Step {
    name: String,
    handler: StepHandler,
}

impl Step {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: FnOnce(&mut OperationContext) -> ControllerResult<()> + Send + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn execute(self, context: &mut OperationContext) -> ControllerResult<()> {
        (self.handler)(context)
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}
