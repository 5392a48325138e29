//! Resource definitions for the management security realm tree.
//!
//! - `/security-realm=*` - A security realm
//! - `/security-realm=*/authorization=ldap` - LDAP group loading for a realm
//!
//! Definitions are built once from the embedded schemas and shared.

pub mod ldap_authorization;

pub use ldap_authorization::{
    LDAP_AUTHORIZATION_PATTERN, SECURITY_REALM_PATTERN, ldap_authorization_constraints,
    ldap_authorization_definition, security_realm_definition,
};

use crate::error::BuildError;
use crate::resource::ResourceDefinition;
use std::sync::Arc;

/// Every definition of the security realm tree, parents first.
pub fn standard_definitions() -> Result<Vec<Arc<ResourceDefinition>>, BuildError> {
    Ok(vec![
        security_realm_definition()?,
        ldap_authorization_definition()?,
    ])
}
