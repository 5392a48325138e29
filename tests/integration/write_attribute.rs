//! WriteAttribute: the merged state is held to the same rules as an add.

use crate::common::{self, REALM, fixtures};
use model_controller::{
    ControllerError, InMemoryStore, ModelController, ModelOperation, ValidationError,
};
use serde_json::json;

#[tokio::test]
async fn test_clearing_pattern_while_group_set_fails() {
    common::init_logging();
    let (controller, ldap) =
        common::controller_with_ldap(json!({"pattern": "x", "group": 3})).await;
    let before = controller.version(&ldap).await.unwrap();

    let result = controller.undefine_attribute(&ldap, "pattern").await;
    assert_dependency_violation!(result, "pattern", "group");

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, json!({"pattern": "x", "group": 3}));
    assert_eq!(controller.version(&ldap).await.unwrap(), before);
}

#[tokio::test]
async fn test_writing_null_pattern_while_result_pattern_set_fails() {
    let (controller, ldap) =
        common::controller_with_ldap(json!({"pattern": "x", "result-pattern": "{1}"})).await;

    let result = controller
        .write_attribute(&ldap, "pattern", serde_json::Value::Null)
        .await;
    assert_dependency_violation!(result, "pattern", "result-pattern");
}

#[tokio::test]
async fn test_clearing_pattern_after_dependents_cleared_succeeds() {
    let (controller, ldap) =
        common::controller_with_ldap(json!({"pattern": "x", "group": 3})).await;

    controller.undefine_attribute(&ldap, "group").await.unwrap();
    controller.undefine_attribute(&ldap, "pattern").await.unwrap();

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, json!({}));
}

#[tokio::test]
async fn test_setting_group_without_pattern_fails() {
    let (controller, ldap) =
        common::controller_with_ldap(json!({"username-attribute": "uid"})).await;

    let result = controller.write_attribute(&ldap, "group", json!(2)).await;
    assert_dependency_violation!(result, "pattern", "group");

    let result = controller
        .write_attribute(&ldap, "result-pattern", json!("{1}"))
        .await;
    assert_dependency_violation!(result, "pattern", "result-pattern");
}

#[tokio::test]
async fn test_write_replaces_one_attribute() {
    let (controller, ldap) =
        common::controller_with_ldap(fixtures::ldap_with_group_mapping()).await;

    controller.write_attribute(&ldap, "group", json!(5)).await.unwrap();

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    let mut expected = fixtures::ldap_with_group_mapping();
    expected["group"] = json!(5);
    assert_eq!(stored, expected);
}

#[tokio::test]
async fn test_write_invalid_value_fails() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    assert_validation_error!(
        controller.write_attribute(&ldap, "group", json!(10)).await,
        ValidationError::InvalidAttributeValue { .. }
    );
    assert_validation_error!(
        controller.write_attribute(&ldap, "group", json!("three")).await,
        ValidationError::InvalidAttributeType { .. }
    );
    assert_validation_error!(
        controller.write_attribute(&ldap, "groups-dn", json!("")).await,
        ValidationError::InvalidAttributeValue { .. }
    );

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, fixtures::ldap_minimal());
}

#[tokio::test]
async fn test_write_alternative_conflict() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let result = controller
        .write_attribute(&ldap, "advanced-filter", json!("(uid={0})"))
        .await;
    assert_validation_error!(result, ValidationError::ConflictingAlternatives { .. });

    // Swapping the lookup works once the other alternative is cleared.
    controller
        .undefine_attribute(&ldap, "username-attribute")
        .await
        .unwrap();
    controller
        .write_attribute(&ldap, "advanced-filter", json!("(uid={0})"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_write_unknown_attribute() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let result = controller.write_attribute(&ldap, "recursive", json!(true)).await;
    assert_validation_error!(
        result,
        ValidationError::UnknownAttribute { .. }
    );

    let response = controller
        .execute(ModelOperation::undefine_attribute(ldap, "recursive"))
        .await;
    assert_eq!(response.error_code.as_deref(), Some("UNKNOWN_ATTRIBUTE"));
}

#[tokio::test]
async fn test_write_unknown_attribute_dropped_when_tolerated() {
    let controller = ModelController::builder(InMemoryStore::new())
        .reject_unknown_attributes(false)
        .with_standard_definitions()
        .unwrap()
        .build()
        .unwrap();
    let realm = common::realm_address(REALM);
    let ldap = common::ldap_address(REALM);
    controller.add(&realm, json!({})).await.unwrap();
    controller
        .add(&ldap, json!({"pattern": "x", "bogus": 1}))
        .await
        .unwrap();
    let before = controller.version(&ldap).await.unwrap();

    let outcome = controller
        .write_attribute(&ldap, "bogus", json!(1))
        .await
        .unwrap();
    assert!(!outcome.response_headers.restart_required);

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    assert_eq!(stored, json!({"pattern": "x"}));
    assert_eq!(controller.version(&ldap).await.unwrap(), before);

    // A tolerated name still needs an existing resource.
    let missing = common::ldap_address("OtherRealm");
    assert!(matches!(
        controller.write_attribute(&missing, "bogus", json!(1)).await,
        Err(ControllerError::ResourceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_write_missing_resource() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller.write_attribute(&ldap, "pattern", json!("p")).await;
    assert!(matches!(result, Err(ControllerError::ResourceNotFound { .. })));
}

#[tokio::test]
async fn test_write_without_attribute_name() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let operation = ModelOperation {
        name: None,
        ..ModelOperation::write_attribute(ldap, "group", json!(1))
    };
    let response = controller.execute(operation).await;
    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("INVALID_OPERATION"));
}

#[tokio::test]
async fn test_write_default_valued_attribute() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    controller
        .write_attribute(&ldap, "reverse-group", json!(true))
        .await
        .unwrap();
    assert_eq!(
        controller.read_attribute(&ldap, "reverse-group").await.unwrap(),
        json!(true)
    );

    controller.undefine_attribute(&ldap, "reverse-group").await.unwrap();
    assert_eq!(
        controller.read_attribute(&ldap, "reverse-group").await.unwrap(),
        json!(false)
    );
}
