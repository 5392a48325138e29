//! Reads: stored state with or without defaults, and the resource description.

use crate::common::{self, REALM, fixtures};
use model_controller::{ModelController, ModelOperation, ValidationError};
use serde_json::json;

#[tokio::test]
async fn test_read_resource_includes_defaults() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let result = controller.read_resource(&ldap).await.unwrap();
    assert_eq!(
        result,
        json!({
            "username-attribute": "uid",
            "pattern": "CN=(.*?),.*",
            "groups-dn": "dn",
            "reverse-group": false
        })
    );
}

#[tokio::test]
async fn test_read_resource_without_defaults() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let response = controller
        .execute(ModelOperation::read_resource(ldap).include_defaults(false))
        .await;
    assert!(response.success);
    assert_eq!(response.result, Some(fixtures::ldap_minimal()));
}

#[tokio::test]
async fn test_config_disables_defaults_for_reads() {
    let controller = ModelController::builder(model_controller::InMemoryStore::new())
        .include_defaults(false)
        .with_standard_definitions()
        .unwrap()
        .build()
        .unwrap();
    let realm = common::realm_address(REALM);
    controller.add(&realm, json!({})).await.unwrap();

    assert_eq!(controller.read_resource(&realm).await.unwrap(), json!({}));

    let response = controller
        .execute(ModelOperation::read_resource(realm).include_defaults(true))
        .await;
    assert_eq!(response.result, Some(json!({"map-groups-to-roles": true})));
}

#[tokio::test]
async fn test_read_attribute() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    assert_eq!(
        controller.read_attribute(&ldap, "pattern").await.unwrap(),
        json!("CN=(.*?),.*")
    );
    assert_eq!(
        controller.read_attribute(&ldap, "groups-dn").await.unwrap(),
        json!("dn")
    );
    assert_eq!(
        controller.read_attribute(&ldap, "group").await.unwrap(),
        serde_json::Value::Null
    );

    let response = controller
        .execute(ModelOperation::read_attribute(ldap, "groups-dn").include_defaults(false))
        .await;
    assert_eq!(response.result, Some(serde_json::Value::Null));
}

#[tokio::test]
async fn test_read_unknown_attribute() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let result = controller.read_attribute(&ldap, "recursive").await;
    assert_validation_error!(result, ValidationError::UnknownAttribute { .. });
}

#[tokio::test]
async fn test_read_does_not_change_version() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let before = controller.version(&ldap).await.unwrap();

    let response = controller.execute(ModelOperation::read_resource(ldap.clone())).await;
    assert_eq!(response.response_headers.version, Some(before.to_string()));
    assert_eq!(controller.version(&ldap).await.unwrap(), before);
}

#[tokio::test]
async fn test_read_resource_description() {
    let controller = common::controller();
    let ldap = common::ldap_address(REALM);

    let response = controller
        .execute(ModelOperation::read_resource_description(ldap))
        .await;
    assert!(response.success);

    let description = response.result.unwrap();
    assert_eq!(description["id"], "ldap-authorization");
    assert_eq!(description["pattern"], "/security-realm=*/authorization=ldap");
    assert_eq!(description["restartOnAdd"], true);

    let attributes = description["attributes"].as_array().unwrap();
    assert_eq!(attributes.len(), 7);
    let groups_dn = attributes
        .iter()
        .find(|attr| attr["name"] == "groups-dn")
        .unwrap();
    assert_eq!(groups_dn["xmlName"], "attribute");
    assert_eq!(groups_dn["defaultValue"], "dn");
}

#[tokio::test]
async fn test_response_rendering() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;

    let response = controller
        .execute(ModelOperation::read_attribute(ldap, "pattern").with_request_id("read-1"))
        .await;
    let body = response.to_value();

    assert_eq!(body["outcome"], "success");
    assert_eq!(body["result"], "CN=(.*?),.*");
    assert_eq!(body["request-id"], "read-1");
    assert_eq!(body["response-headers"]["restart-required"], false);
}
