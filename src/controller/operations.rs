//! Operation dispatch for the model controller.
//!
//! Every operation follows the same path: resolve the definition for the
//! target address, lock the address if the operation mutates it, read the
//! tree state, let the operation's handler enqueue its steps, run the `Model`
//! stage, commit the staged change, release the lock and run the `Runtime`
//! stage.

use super::core::ModelController;
use crate::error::{ControllerError, ControllerResult};
use crate::operation_handler::handlers;
use crate::operation_handler::{
    ModelOperation, OperationResponse, OperationType, ResponseHeaders, create_error_response,
};
use crate::pipeline::{OperationContext, Stage, StagedChange, TreeSnapshot};
use crate::resource::{ModelVersion, ResourceModel, ResourcePath};
use crate::storage::ModelStore;
use log::{debug, info, warn};
use serde_json::Value;

/// Result of a successfully executed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    /// Value produced by the operation, if any
    pub result: Option<Value>,
    /// Effects of the operation
    pub response_headers: ResponseHeaders,
}

impl<S: ModelStore> ModelController<S> {
    /// Execute an operation and render its outcome as a response.
    ///
    /// This never fails: errors are reported in the response with an error code.
    pub async fn execute(&self, operation: ModelOperation) -> OperationResponse {
        let request_id = operation
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Model controller processing {} on {} (request: '{}')",
            operation.operation, operation.address, request_id
        );

        match self.process(operation).await {
            Ok(outcome) => {
                debug!(
                    "Model controller completed successfully (request: '{}')",
                    request_id
                );
                OperationResponse::success(outcome.result, outcome.response_headers, request_id)
            }
            Err(e) => {
                warn!("Model controller operation failed: {} (request: '{}')", e, request_id);
                create_error_response(e, request_id)
            }
        }
    }

    /// Execute an operation, returning its outcome or the first error.
    pub async fn process(
        &self,
        mut operation: ModelOperation,
    ) -> ControllerResult<OperationOutcome> {
        let definition = self.find_definition(&operation.address)?;
        if operation.address.is_pattern() {
            return Err(ControllerError::invalid_operation(
                operation.operation.as_str(),
                format!("{} is not a concrete address", operation.address),
            ));
        }
        if operation.include_defaults.is_none() {
            operation.include_defaults = Some(self.config.include_defaults);
        }

        // Reads stage nothing, so they see the last committed model without locking.
        let guards = if operation.operation.is_mutating() {
            self.locks.acquire(lock_addresses(&operation)).await
        } else {
            Vec::new()
        };
        let snapshot = self.snapshot(&operation).await?;

        let mut context = OperationContext::new(operation, definition, snapshot)
            .with_reject_unknown(self.config.reject_unknown_attributes)
            .with_max_steps_per_stage(self.config.max_steps_per_stage);

        handlers::register_steps(&mut context)?;
        context.run_stage(Stage::Model)?;

        let version = match context.commit()? {
            Some(StagedChange::Put(model)) => match self.store.put(model).await {
                Ok(stored) => {
                    debug!("Committed {} (version {})", stored.address(), stored.version());
                    Some(stored.version())
                }
                Err(e) => return Err(context.fail(e.into())),
            },
            Some(StagedChange::Remove(address)) => {
                self.store
                    .delete(&address)
                    .await
                    .map_err(|e| context.fail(e.into()))?;
                debug!("Committed removal of {}", address);
                None
            }
            None => context.snapshot().current.as_ref().map(ResourceModel::version),
        };
        drop(guards);

        context.run_stage(Stage::Runtime)?;

        Ok(OperationOutcome {
            result: context.take_result(),
            response_headers: ResponseHeaders {
                restart_required: context.restart_required(),
                version: version.map(|v| v.to_string()),
            },
        })
    }

    /// Add a resource from a full attribute proposal.
    pub async fn add(
        &self,
        address: &ResourcePath,
        attributes: Value,
    ) -> ControllerResult<OperationOutcome> {
        self.process(ModelOperation::add(address.clone(), attributes))
            .await
    }

    /// Write one attribute of an existing resource; `null` clears it.
    pub async fn write_attribute(
        &self,
        address: &ResourcePath,
        name: &str,
        value: Value,
    ) -> ControllerResult<OperationOutcome> {
        self.process(ModelOperation::write_attribute(address.clone(), name, value))
            .await
    }

    /// Clear one attribute of an existing resource.
    pub async fn undefine_attribute(
        &self,
        address: &ResourcePath,
        name: &str,
    ) -> ControllerResult<OperationOutcome> {
        self.process(ModelOperation::undefine_attribute(address.clone(), name))
            .await
    }

    /// Remove a resource without children.
    pub async fn remove(&self, address: &ResourcePath) -> ControllerResult<OperationOutcome> {
        self.process(ModelOperation::remove(address.clone())).await
    }

    /// Read every attribute of a resource, with defaults per configuration.
    pub async fn read_resource(&self, address: &ResourcePath) -> ControllerResult<Value> {
        let outcome = self
            .process(ModelOperation::read_resource(address.clone()))
            .await?;
        Ok(outcome.result.unwrap_or(Value::Null))
    }

    /// Read one attribute of a resource, with defaults per configuration.
    pub async fn read_attribute(
        &self,
        address: &ResourcePath,
        name: &str,
    ) -> ControllerResult<Value> {
        let outcome = self
            .process(ModelOperation::read_attribute(address.clone(), name))
            .await?;
        Ok(outcome.result.unwrap_or(Value::Null))
    }

    /// Current content version of the resource at `address`.
    pub async fn version(&self, address: &ResourcePath) -> ControllerResult<ModelVersion> {
        self.store
            .get(address)
            .await?
            .map(|model| model.version())
            .ok_or_else(|| ControllerError::resource_not_found(address))
    }

    async fn snapshot(&self, operation: &ModelOperation) -> ControllerResult<TreeSnapshot> {
        let address = &operation.address;
        let current = self.store.get(address).await?;

        let parent_exists = match address.parent() {
            Some(parent) if !parent.is_root() => self.store.exists(&parent).await?,
            _ => true,
        };

        let children = if operation.operation == OperationType::Remove {
            self.store.children(address).await?
        } else {
            Vec::new()
        };

        Ok(TreeSnapshot {
            current,
            parent_exists,
            children,
        })
    }
}

/// Addresses locked for an operation.
///
/// Add also locks the parent so a concurrent remove of the parent cannot
/// commit between the parent check and the insert.
fn lock_addresses(operation: &ModelOperation) -> Vec<ResourcePath> {
    let mut addresses = vec![operation.address.clone()];
    if operation.operation == OperationType::Add {
        if let Some(parent) = operation.address.parent().filter(|p| !p.is_root()) {
            addresses.push(parent);
        }
    }
    addresses
}
