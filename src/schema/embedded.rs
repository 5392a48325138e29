//! Embedded attribute schemas for the management security resources.
//!
//! The schemas ship as static JSON strings so that the standard resource
//! definitions can be built without external files.

/// Schema id of the security realm resource.
pub const SECURITY_REALM_SCHEMA_ID: &str = "security-realm";

/// Schema id of the LDAP authorization resource.
pub const LDAP_AUTHORIZATION_SCHEMA_ID: &str = "ldap-authorization";

/// Returns the security realm schema as a JSON string.
pub fn security_realm_schema() -> &'static str {
    r#"{
  "id": "security-realm",
  "description": "A security realm used to secure the management interfaces",
  "attributes": [
    {
      "name": "map-groups-to-roles",
      "type": "boolean",
      "required": false,
      "defaultValue": true,
      "restartRequired": false,
      "description": "Whether group membership loaded for a user is mapped to roles"
    }
  ]
}"#
}

/// Returns the LDAP authorization schema as a JSON string.
///
/// Every attribute affects the realm's running services, so all of them are
/// flagged as restart-required.
pub fn ldap_authorization_schema() -> &'static str {
    r#"{
  "id": "ldap-authorization",
  "description": "Loads group membership for an authenticated user from LDAP",
  "attributes": [
    {
      "name": "username-attribute",
      "type": "string",
      "required": false,
      "validator": { "kind": "stringLength", "min": 1 },
      "alternatives": ["advanced-filter"],
      "restartRequired": true,
      "xmlName": "username-attribute",
      "description": "Attribute of the user entry matched against the supplied user name"
    },
    {
      "name": "advanced-filter",
      "type": "string",
      "required": false,
      "validator": { "kind": "stringLength", "min": 1 },
      "alternatives": ["username-attribute"],
      "restartRequired": true,
      "xmlName": "advanced-filter",
      "description": "Fully defined filter used to locate the user entry"
    },
    {
      "name": "groups-dn",
      "type": "string",
      "required": false,
      "defaultValue": "dn",
      "validator": { "kind": "stringLength", "min": 1 },
      "restartRequired": true,
      "xmlName": "attribute",
      "description": "Attribute of the group entry holding the member distinguished name"
    },
    {
      "name": "pattern",
      "type": "string",
      "required": false,
      "validator": { "kind": "stringLength", "min": 1 },
      "restartRequired": true,
      "description": "Regular expression applied to group names"
    },
    {
      "name": "result-pattern",
      "type": "string",
      "required": false,
      "validator": { "kind": "stringLength", "min": 1 },
      "restartRequired": true,
      "description": "Template used to build the resulting group name from pattern groups"
    },
    {
      "name": "group",
      "type": "integer",
      "required": false,
      "validator": { "kind": "intRange", "min": 1, "max": 9 },
      "restartRequired": true,
      "description": "Capture group of the pattern used as the group name"
    },
    {
      "name": "reverse-group",
      "type": "boolean",
      "required": false,
      "defaultValue": false,
      "restartRequired": true,
      "description": "Whether group membership is read from the group entry instead of the user entry"
    }
  ]
}"#
}

/// All embedded schemas.
pub fn all() -> [&'static str; 2] {
    [security_realm_schema(), ldap_authorization_schema()]
}
