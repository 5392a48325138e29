//! Attribute schemas and per-attribute validation.
//!
//! # Key Types
//!
//! - [`AttributeSchema`] - Immutable catalog of attribute definitions for one resource type
//! - [`AttributeDefinition`] - Type, default, validator and alternatives of one attribute
//! - [`EffectiveMap`] - A validated attribute map with defaults materialized
//! - [`SchemaRegistry`] - Loads schemas from embedded JSON or files
//!
//! # Examples
//!
//! ```rust
//! use model_controller::schema::SchemaRegistry;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::new()?;
//! let schema = registry.get_schema("ldap-authorization").expect("embedded schema");
//!
//! let effective = schema.validate_value(&json!({"pattern": "cn=(.*)", "group": 1}))?;
//! assert_eq!(effective.get("groups-dn"), Some(&json!("dn")));
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;
pub mod validation;


pub use registry::SchemaRegistry;
pub use types::{
    AttributeDefinition, AttributeDefinitionBuilder, AttributeSchema, AttributeType,
    AttributeValidator, EffectiveMap,
};
