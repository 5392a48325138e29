//! Operations guarded by an expected content version.

use crate::common::{self, REALM, fixtures};
use model_controller::{ControllerError, ModelOperation, ModelVersion};
use serde_json::json;

#[tokio::test]
async fn test_write_with_current_version_succeeds() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let version = controller.version(&ldap).await.unwrap();

    let outcome = controller
        .process(
            ModelOperation::write_attribute(ldap.clone(), "group", json!(1))
                .with_expected_version(version.clone()),
        )
        .await
        .unwrap();

    let new_version = controller.version(&ldap).await.unwrap();
    assert_ne!(new_version, version);
    assert_eq!(outcome.response_headers.version, Some(new_version.to_string()));
}

#[tokio::test]
async fn test_stale_version_is_rejected() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let stale = controller.version(&ldap).await.unwrap();

    controller.write_attribute(&ldap, "group", json!(1)).await.unwrap();
    let current = controller.version(&ldap).await.unwrap();

    let result = controller
        .process(
            ModelOperation::write_attribute(ldap.clone(), "group", json!(2))
                .with_expected_version(stale.clone()),
        )
        .await;
    match result {
        Err(ControllerError::VersionMismatch {
            expected,
            current: reported,
            ..
        }) => {
            assert_eq!(expected, stale.to_string());
            assert_eq!(reported, current.to_string());
        }
        other => panic!("Expected version mismatch, got {:?}", other),
    }
    assert_eq!(controller.read_attribute(&ldap, "group").await.unwrap(), json!(1));
}

#[tokio::test]
async fn test_version_mismatch_response() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let current = controller.version(&ldap).await.unwrap();

    let response = controller
        .execute(
            ModelOperation::remove(ldap.clone())
                .with_expected_version(ModelVersion::from_hash("stale")),
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.error_code.as_deref(), Some("VERSION_MISMATCH"));
    assert_eq!(response.response_headers.version, Some(current.to_string()));
    assert!(!response.response_headers.restart_required);
    assert!(common::stored_attributes(&controller, &ldap).await.is_some());
}

#[tokio::test]
async fn test_expected_version_on_missing_resource() {
    let (controller, _) = common::controller_with_realm().await;
    let ldap = common::ldap_address(REALM);

    let result = controller
        .process(
            ModelOperation::add(ldap, fixtures::ldap_minimal())
                .with_expected_version(ModelVersion::from_hash("anything")),
        )
        .await;
    assert!(matches!(result, Err(ControllerError::ResourceNotFound { .. })));
}

#[tokio::test]
async fn test_version_tracks_content() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let original = controller.version(&ldap).await.unwrap();

    controller.write_attribute(&ldap, "group", json!(1)).await.unwrap();
    assert_ne!(controller.version(&ldap).await.unwrap(), original);

    controller.undefine_attribute(&ldap, "group").await.unwrap();
    assert_eq!(controller.version(&ldap).await.unwrap(), original);
}
