//! Resources of the management tree.
//!
//! - [`path`] - `(type, name)` addresses and address patterns
//! - [`model`] - The stored attribute state of one resource
//! - [`definition`] - Schema, constraints and flags registered per resource type
//! - [`version`] - Content versions used for conditional operations

pub mod definition;
pub mod model;
pub mod path;
pub mod version;

pub use definition::{ResourceDefinition, ResourceDefinitionBuilder};
pub use model::ResourceModel;
pub use path::{PathElement, PathParseError, ResourcePath};
pub use version::ModelVersion;
