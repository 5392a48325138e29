//! The per-operation staged execution context.
//!
//! An [`OperationContext`] owns the queues of steps for each [`Stage`], the
//! snapshot of the tree the operation was admitted against, and the change the
//! operation has staged so far. Steps receive `&mut OperationContext`, may
//! enqueue further steps, stage a change, record a result, and must call
//! [`OperationContext::step_completed`] exactly once before returning `Ok`.
//!
//! Nothing a step does is visible outside the context until the controller
//! commits the staged change after the `Model` stage has fully succeeded.

use super::step::{Stage, Step};
use crate::error::{ControllerError, ControllerResult};
use crate::operation_handler::ModelOperation;
use crate::resource::{ResourceDefinition, ResourceModel, ResourcePath};
use log::{debug, error};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Lifecycle of one operation's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Steps may be registered; nothing has run.
    Pending,
    /// The `Model` stage is running or has finished without commit.
    ModelValidating,
    /// The staged change has been written to the store.
    ModelCommitted,
    /// The `Runtime` stage is running.
    RuntimeApplying,
    /// Every stage finished.
    Complete,
    /// A step failed; nothing was committed unless the failure was in `Runtime`.
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Complete | PipelineState::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Pending => "pending",
            PipelineState::ModelValidating => "model-validating",
            PipelineState::ModelCommitted => "model-committed",
            PipelineState::RuntimeApplying => "runtime-applying",
            PipelineState::Complete => "complete",
            PipelineState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// The mutation an operation asks the controller to commit.
#[derive(Debug, Clone, PartialEq)]
pub enum StagedChange {
    /// Store this model at its address.
    Put(ResourceModel),
    /// Delete the model at this address.
    Remove(ResourcePath),
}

/// State of the tree at the target address when the operation was admitted.
#[derive(Debug, Clone, Default)]
pub struct TreeSnapshot {
    /// The stored model at the target address.
    pub current: Option<ResourceModel>,
    /// Whether the parent address exists; always true for top-level addresses.
    pub parent_exists: bool,
    /// Direct children of the target address.
    pub children: Vec<ResourcePath>,
}

/// Execution context threaded through every step of one operation.
pub struct OperationContext {
    operation: ModelOperation,
    definition: Arc<ResourceDefinition>,
    snapshot: TreeSnapshot,
    reject_unknown: bool,
    max_steps_per_stage: usize,
    state: PipelineState,
    model_steps: VecDeque<Step>,
    runtime_steps: VecDeque<Step>,
    current_stage: Option<Stage>,
    completions: usize,
    staged: Option<StagedChange>,
    result: Option<Value>,
    restart_required: bool,
}

impl fmt::Debug for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationContext")
            .field("operation", &self.operation.operation)
            .field("address", &self.operation.address)
            .field("state", &self.state)
            .field("model_steps", &self.model_steps.len())
            .field("runtime_steps", &self.runtime_steps.len())
            .field("staged", &self.staged)
            .finish()
    }
}

impl OperationContext {
    pub fn new(
        operation: ModelOperation,
        definition: Arc<ResourceDefinition>,
        snapshot: TreeSnapshot,
    ) -> Self {
        Self {
            operation,
            definition,
            snapshot,
            reject_unknown: true,
            max_steps_per_stage: 64,
            state: PipelineState::Pending,
            model_steps: VecDeque::new(),
            runtime_steps: VecDeque::new(),
            current_stage: None,
            completions: 0,
            staged: None,
            result: None,
            restart_required: false,
        }
    }

    /// Whether undeclared attributes fail validation.
    pub fn with_reject_unknown(mut self, reject_unknown: bool) -> Self {
        self.reject_unknown = reject_unknown;
        self
    }

    /// Upper bound on steps executed per stage.
    pub fn with_max_steps_per_stage(mut self, max_steps: usize) -> Self {
        self.max_steps_per_stage = max_steps;
        self
    }

    pub fn operation(&self) -> &ModelOperation {
        &self.operation
    }

    pub fn address(&self) -> &ResourcePath {
        &self.operation.address
    }

    pub fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    pub fn snapshot(&self) -> &TreeSnapshot {
        &self.snapshot
    }

    pub fn reject_unknown(&self) -> bool {
        self.reject_unknown
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Enqueue a step; steps run FIFO within their stage.
    ///
    /// `Model` steps may be added until the `Model` stage has finished.
    /// `Runtime` steps may be added until the operation completes.
    pub fn add_step<F>(
        &mut self,
        stage: Stage,
        name: impl Into<String>,
        handler: F,
    ) -> ControllerResult<()>
    where
        F: FnOnce(&mut OperationContext) -> ControllerResult<()> + Send + 'static,
    {
        let step = Step::new(name, handler);
        let accepts = match stage {
            Stage::Model => {
                matches!(self.state, PipelineState::Pending)
                    || (self.state == PipelineState::ModelValidating
                        && self.current_stage == Some(Stage::Model))
            }
            Stage::Runtime => !self.state.is_terminal(),
        };

        if !accepts {
            return Err(ControllerError::pipeline_integrity(format!(
                "step '{}' cannot be added to the {} stage in state {}",
                step.name(),
                stage,
                self.state
            )));
        }

        debug!("Enqueued {} step '{}' for {}", stage, step.name(), self.address());
        match stage {
            Stage::Model => self.model_steps.push_back(step),
            Stage::Runtime => self.runtime_steps.push_back(step),
        }
        Ok(())
    }

    /// Signal that the running step has finished its work.
    pub fn step_completed(&mut self) {
        self.completions += 1;
    }

    /// The model as this operation currently sees it: the staged model if one
    /// has been staged, otherwise the stored one.
    pub fn read_resource(&self) -> ControllerResult<&ResourceModel> {
        match &self.staged {
            Some(StagedChange::Put(model)) => Ok(model),
            Some(StagedChange::Remove(_)) => {
                Err(ControllerError::resource_not_found(self.address()))
            }
            None => self
                .snapshot
                .current
                .as_ref()
                .ok_or_else(|| ControllerError::resource_not_found(self.address())),
        }
    }

    /// Stage a model to be stored at commit.
    pub fn stage_model(&mut self, model: ResourceModel) -> ControllerResult<()> {
        self.ensure_model_stage("stage a model")?;
        self.staged = Some(StagedChange::Put(model));
        Ok(())
    }

    /// Stage removal of the target address.
    pub fn stage_removal(&mut self) -> ControllerResult<()> {
        self.ensure_model_stage("stage a removal")?;
        self.staged = Some(StagedChange::Remove(self.address().clone()));
        Ok(())
    }

    pub fn staged_change(&self) -> Option<&StagedChange> {
        self.staged.as_ref()
    }

    /// Record the operation's result value.
    pub fn set_result(&mut self, result: Value) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Flag that the committed change requires dependent services to restart.
    pub fn mark_restart_required(&mut self) {
        self.restart_required = true;
    }

    pub fn restart_required(&self) -> bool {
        self.restart_required
    }

    /// Run every queued step of `stage`, including steps enqueued while it runs.
    ///
    /// The first failing step moves the pipeline to `Failed`, drops any staged
    /// change and remaining steps, and returns its error.
    pub fn run_stage(&mut self, stage: Stage) -> ControllerResult<()> {
        let expected = match stage {
            Stage::Model => PipelineState::Pending,
            Stage::Runtime => PipelineState::ModelCommitted,
        };
        if self.state != expected {
            return Err(self.fail(ControllerError::pipeline_integrity(format!(
                "the {} stage cannot run in state {}",
                stage, self.state
            ))));
        }

        self.state = match stage {
            Stage::Model => PipelineState::ModelValidating,
            Stage::Runtime => PipelineState::RuntimeApplying,
        };
        self.current_stage = Some(stage);
        debug!("Running {} stage for {}", stage, self.address());

        let mut executed = 0;
        while let Some(step) = self.next_step(stage) {
            executed += 1;
            if executed > self.max_steps_per_stage {
                return Err(self.fail(ControllerError::pipeline_integrity(format!(
                    "the {} stage exceeded {} steps",
                    stage, self.max_steps_per_stage
                ))));
            }

            let name = step.name().to_string();
            self.completions = 0;
            debug!("Executing {} step '{}'", stage, name);

            if let Err(e) = step.execute(self) {
                debug!("{} step '{}' failed: {}", stage, name, e);
                return Err(self.fail(e));
            }

            match self.completions {
                1 => {}
                0 => {
                    return Err(self.fail(ControllerError::pipeline_integrity(format!(
                        "step '{}' returned without signalling completion",
                        name
                    ))));
                }
                n => {
                    return Err(self.fail(ControllerError::pipeline_integrity(format!(
                        "step '{}' signalled completion {} times",
                        name, n
                    ))));
                }
            }
        }

        self.current_stage = None;
        if stage == Stage::Runtime {
            self.state = PipelineState::Complete;
        }
        Ok(())
    }

    /// Hand the staged change to the caller for persistence and move to
    /// `ModelCommitted`. Returns `None` when the operation staged nothing.
    ///
    /// If persisting the change fails the caller must report it through
    /// [`OperationContext::fail`].
    pub fn commit(&mut self) -> ControllerResult<Option<StagedChange>> {
        if self.state != PipelineState::ModelValidating || self.current_stage.is_some() {
            return Err(self.fail(ControllerError::pipeline_integrity(format!(
                "cannot commit in state {}",
                self.state
            ))));
        }
        self.state = PipelineState::ModelCommitted;
        Ok(self.staged.take())
    }

    /// Move to `Failed`, discarding the staged change and remaining steps.
    pub fn fail(&mut self, error: ControllerError) -> ControllerError {
        if let ControllerError::PipelineIntegrity { message } = &error {
            error!(
                "Pipeline integrity failure for {} on {}: {}",
                self.operation.operation,
                self.address(),
                message
            );
        }
        self.state = PipelineState::Failed;
        self.current_stage = None;
        self.staged = None;
        self.model_steps.clear();
        self.runtime_steps.clear();
        error
    }

    pub(crate) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }

    fn next_step(&mut self, stage: Stage) -> Option<Step> {
        match stage {
            Stage::Model => self.model_steps.pop_front(),
            Stage::Runtime => self.runtime_steps.pop_front(),
        }
    }

    fn ensure_model_stage(&self, action: &str) -> ControllerResult<()> {
        if self.current_stage == Some(Stage::Model) {
            Ok(())
        } else {
            Err(ControllerError::pipeline_integrity(format!(
                "cannot {} outside the model stage",
                action
            )))
        }
    }
}
