//! The model controller: resolves definitions, runs the staged pipeline and
//! commits validated changes to the store.
//!
//! # Module Organization
//!
//! * [`core`] - `ModelController` struct, construction and per-address locking
//! * [`builder`] - `ControllerConfig` and `ModelControllerBuilder`
//! * [`registration`] - Resource definition registration and lookup
//! * [`operations`] - Operation dispatch and typed convenience operations

pub mod builder;
pub mod core;
pub mod operations;
pub mod registration;

pub use builder::{ControllerConfig, ModelControllerBuilder};
pub use core::ModelController;
pub use operations::OperationOutcome;
