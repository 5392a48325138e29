//! Add: full proposals are validated before anything is stored.

use crate::common::{self, REALM, fixtures};
use model_controller::storage::ModelStore;
use model_controller::{
    ControllerError, ModelController, ModelOperation, ResourcePath, ValidationError,
};
use serde_json::json;

#[tokio::test]
async fn test_add_valid_ldap_authorization() {
    common::init_logging();
    let (controller, ldap) =
        common::controller_with_ldap(fixtures::ldap_with_group_mapping()).await;

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, fixtures::ldap_with_group_mapping());
}

#[tokio::test]
async fn test_add_stores_explicit_values_only() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, fixtures::ldap_minimal());
    assert!(stored.get("groups-dn").is_none());
}

#[tokio::test]
async fn test_add_group_without_pattern_fails() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller.add(&ldap, fixtures::ldap_group_without_pattern()).await;
    assert_dependency_violation!(result, "pattern", "group");
}

#[tokio::test]
async fn test_add_result_pattern_without_pattern_fails() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller
        .add(&ldap, fixtures::ldap_result_pattern_without_pattern())
        .await;
    assert_dependency_violation!(result, "pattern", "result-pattern");
}

#[tokio::test]
async fn test_failed_add_leaves_nothing_behind() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller.add(&ldap, fixtures::ldap_group_without_pattern()).await;
    assert!(result.is_err());

    assert!(common::stored_attributes(&controller, &ldap).await.is_none());
    assert_eq!(controller.store().count().await.unwrap(), 1);
    assert!(matches!(
        controller.remove(&ldap).await,
        Err(ControllerError::ResourceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_add_conflicting_alternatives_fails() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller.add(&ldap, fixtures::ldap_conflicting_lookup()).await;
    assert_validation_error!(result, ValidationError::ConflictingAlternatives { .. });
}

#[tokio::test]
async fn test_add_with_advanced_filter_alone_succeeds() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller
        .add(&ldap, json!({"advanced-filter": "(uid={0})", "pattern": "p"}))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_add_existing_address_fails() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let result = controller.add(&ldap, fixtures::ldap_minimal()).await;
    assert!(matches!(
        result,
        Err(ControllerError::ResourceAlreadyExists { address }) if address == ldap
    ));
}

#[tokio::test]
async fn test_add_requires_parent() {
    let controller = common::controller();
    let ldap = common::ldap_address("MissingRealm");

    let result = controller.add(&ldap, fixtures::ldap_minimal()).await;
    match result {
        Err(ControllerError::ResourceNotFound { address }) => {
            assert_eq!(address, common::realm_address("MissingRealm"));
        }
        other => panic!("Expected missing parent, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_unknown_attribute_rejected_by_default() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller
        .add(&ldap, json!({"pattern": "p", "recursive": true}))
        .await;
    assert_validation_error!(result, ValidationError::UnknownAttribute { .. });
}

#[tokio::test]
async fn test_add_unknown_attribute_dropped_when_tolerated() {
    let controller = ModelController::builder(model_controller::InMemoryStore::new())
        .reject_unknown_attributes(false)
        .with_standard_definitions()
        .unwrap()
        .build()
        .unwrap();
    let realm = common::realm_address(REALM);
    let ldap = common::ldap_address(REALM);
    controller.add(&realm, json!({})).await.unwrap();

    controller
        .add(&ldap, json!({"pattern": "p", "recursive": true}))
        .await
        .unwrap();

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, json!({"pattern": "p"}));
}

#[tokio::test]
async fn test_add_non_object_proposal_fails() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    assert_validation_error!(
        controller.add(&ldap, json!(["pattern", "p"])).await,
        ValidationError::Custom { .. }
    );

    let response = controller
        .execute(ModelOperation::add(ldap.clone(), json!("p")))
        .await;
    assert_eq!(response.error_code.as_deref(), Some("VALIDATION_ERROR"));
    assert!(common::stored_attributes(&controller, &ldap).await.is_none());
}

#[tokio::test]
async fn test_add_invalid_values() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    assert_validation_error!(
        controller.add(&ldap, json!({"pattern": "p", "group": 0})).await,
        ValidationError::InvalidAttributeValue { .. }
    );
    assert_validation_error!(
        controller.add(&ldap, json!({"pattern": ""})).await,
        ValidationError::InvalidAttributeValue { .. }
    );
    assert_validation_error!(
        controller.add(&ldap, json!({"pattern": "p", "reverse-group": "yes"})).await,
        ValidationError::InvalidAttributeType { .. }
    );
}

#[tokio::test]
async fn test_add_to_unregistered_address() {
    let controller = common::controller();
    let address: ResourcePath = "/subsystem=logging".parse().unwrap();

    let response = controller.execute(ModelOperation::add(address, json!({}))).await;
    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("NO_RESOURCE_DEFINITION"));
}

#[tokio::test]
async fn test_add_to_wildcard_address_rejected() {
    let controller = common::controller();
    let address: ResourcePath = "/security-realm=*".parse().unwrap();

    let response = controller.execute(ModelOperation::add(address, json!({}))).await;
    assert_eq!(response.error_code.as_deref(), Some("INVALID_OPERATION"));
}

#[tokio::test]
async fn test_execute_reports_validation_failure() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let response = controller
        .execute(
            ModelOperation::add(ldap, fixtures::ldap_group_without_pattern())
                .with_request_id("add-1"),
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.request_id, "add-1");
    assert_eq!(response.error_code.as_deref(), Some("VALIDATION_ERROR"));
    assert!(response.failure_description.unwrap().contains("'pattern'"));
    assert!(!response.response_headers.restart_required);
}
