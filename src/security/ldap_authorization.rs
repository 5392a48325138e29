//! The LDAP authorization resource of a security realm.
//!
//! Group loading is configured by a user lookup (`username-attribute` or
//! `advanced-filter`, never both) and an optional group name mapping. The
//! mapping attributes only make sense together with a `pattern`:
//!
//! - `result-pattern` requires `pattern`
//! - `group` requires `pattern`
//!
//! Both rules are enforced on add and on every attribute write, so a stored
//! resource never holds a `group` or `result-pattern` without its `pattern`.

use crate::constraint::{ConstraintRule, ConstraintSet};
use crate::error::BuildError;
use crate::resource::{PathElement, ResourceDefinition, ResourcePath};
use crate::schema::SchemaRegistry;
use crate::schema::embedded::{ldap_authorization_schema, security_realm_schema};
use std::sync::{Arc, LazyLock};

/// Address pattern of security realms.
pub const SECURITY_REALM_PATTERN: &str = "/security-realm=*";

/// Address pattern of the LDAP authorization resource.
pub const LDAP_AUTHORIZATION_PATTERN: &str = "/security-realm=*/authorization=ldap";

type SharedDefinition = Result<Arc<ResourceDefinition>, BuildError>;

static SECURITY_REALM: LazyLock<SharedDefinition> = LazyLock::new(build_security_realm);

static LDAP_AUTHORIZATION: LazyLock<SharedDefinition> = LazyLock::new(build_ldap_authorization);

/// The security realm definition.
pub fn security_realm_definition() -> SharedDefinition {
    shared(&SECURITY_REALM)
}

/// The LDAP authorization definition.
pub fn ldap_authorization_definition() -> SharedDefinition {
    shared(&LDAP_AUTHORIZATION)
}

/// Cross-attribute rules of the LDAP authorization resource, in evaluation order.
pub fn ldap_authorization_constraints() -> ConstraintSet {
    ConstraintSet::new()
        .with_rule(ConstraintRule::requires("result-pattern", "pattern"))
        .with_rule(ConstraintRule::requires("group", "pattern"))
}

fn build_security_realm() -> SharedDefinition {
    let schema = SchemaRegistry::load_schema_from_str(security_realm_schema())?;
    let pattern = ResourcePath::from_elements([PathElement::wildcard("security-realm")]);

    ResourceDefinition::builder(pattern, Arc::new(schema))
        .restart_on_add_remove()
        .build()
        .map(Arc::new)
}

fn build_ldap_authorization() -> SharedDefinition {
    let schema = SchemaRegistry::load_schema_from_str(ldap_authorization_schema())?;
    let pattern = ResourcePath::from_elements([
        PathElement::wildcard("security-realm"),
        PathElement::new("authorization", "ldap"),
    ]);

    ResourceDefinition::builder(pattern, Arc::new(schema))
        .constraints(ldap_authorization_constraints())
        .restart_on_add_remove()
        .build()
        .map(Arc::new)
}

fn shared(definition: &SharedDefinition) -> SharedDefinition {
    match definition {
        Ok(definition) => Ok(Arc::clone(definition)),
        Err(e) => Err(BuildError::SchemaLoad {
            message: e.to_string(),
        }),
    }
}
