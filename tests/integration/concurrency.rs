//! Concurrent operations against one controller.

use crate::common::{self, REALM, fixtures};
use model_controller::storage::ModelStore;
use model_controller::{ControllerError, ModelController, InMemoryStore};
use serde_json::json;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_leave_a_valid_model() {
    let (controller, ldap) = common::controller_with_ldap(fixtures::ldap_minimal()).await;
    let controller = Arc::new(controller);

    let handles: Vec<_> = (1..=9)
        .map(|group| {
            let controller = Arc::clone(&controller);
            let ldap = ldap.clone();
            tokio::spawn(async move {
                controller
                    .write_attribute(&ldap, "group", json!(group))
                    .await
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.unwrap().unwrap();
    }

    let group = controller.read_attribute(&ldap, "group").await.unwrap();
    let group = group.as_i64().unwrap();
    assert!((1..=9).contains(&group));
    assert_eq!(
        controller.read_attribute(&ldap, "pattern").await.unwrap(),
        json!("CN=(.*?),.*")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_adds() {
    let (controller, _) = common::controller_with_realm().await;
    let controller = Arc::new(controller);
    let ldap = common::ldap_address(REALM);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let controller = Arc::clone(&controller);
            let ldap = ldap.clone();
            tokio::spawn(async move { controller.add(&ldap, fixtures::ldap_minimal()).await })
        })
        .collect();

    let mut succeeded = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => succeeded += 1,
            Err(ControllerError::ResourceAlreadyExists { .. }) => {}
            Err(other) => panic!("Unexpected error: {:?}", other),
        }
    }
    assert_eq!(succeeded, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_conflicting_writes_never_break_dependencies() {
    let (controller, ldap) =
        common::controller_with_ldap(json!({"username-attribute": "uid", "pattern": "x"})).await;
    let controller = Arc::new(controller);

    let set_group = {
        let controller = Arc::clone(&controller);
        let ldap = ldap.clone();
        tokio::spawn(async move { controller.write_attribute(&ldap, "group", json!(2)).await })
    };
    let clear_pattern = {
        let controller = Arc::clone(&controller);
        let ldap = ldap.clone();
        tokio::spawn(async move { controller.undefine_attribute(&ldap, "pattern").await })
    };
    let _ = set_group.await.unwrap();
    let _ = clear_pattern.await.unwrap();

    let stored = common::stored_attributes(&controller, &ldap).await.unwrap();
    if stored.get("group").is_some() {
        assert!(stored.get("pattern").is_some(), "group stored without pattern: {}", stored);
    }
}

async fn add_and_remove_race(controller: Arc<ModelController<InMemoryStore>>) {
    let realm = common::realm_address(REALM);
    let ldap = common::ldap_address(REALM);
    controller.add(&realm, json!({})).await.unwrap();

    let add_child = {
        let controller = Arc::clone(&controller);
        let ldap = ldap.clone();
        tokio::spawn(async move { controller.add(&ldap, fixtures::ldap_minimal()).await })
    };
    let remove_parent = {
        let controller = Arc::clone(&controller);
        let realm = realm.clone();
        tokio::spawn(async move { controller.remove(&realm).await })
    };
    let added = add_child.await.unwrap();
    let removed = remove_parent.await.unwrap();

    // Exactly one of the two wins; the child is never left without its parent.
    assert!(added.is_ok() != removed.is_ok());
    let store = controller.store();
    if store.exists(&ldap).await.unwrap() {
        assert!(store.exists(&realm).await.unwrap());
    }

    if added.is_ok() {
        controller.remove(&ldap).await.unwrap();
    }
    let _ = controller.remove(&realm).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_add_child_and_remove_parent_never_orphan() {
    let controller = Arc::new(common::controller());
    for _ in 0..20 {
        add_and_remove_race(Arc::clone(&controller)).await;
        assert_eq!(controller.store().count().await.unwrap(), 0);
    }
}
