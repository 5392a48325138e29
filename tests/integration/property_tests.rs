//! Property-based tests for the LDAP group mapping rules.
//!
//! Whatever combination of group mapping attributes is proposed, a stored
//! model never holds `group` or `result-pattern` without `pattern`, and a
//! rejected operation leaves the stored model untouched.

use crate::common::{self, REALM};
use model_controller::security::ldap_authorization_definition;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone)]
struct GroupMapping {
    pattern: Option<String>,
    group: Option<i64>,
    result_pattern: Option<String>,
}

impl GroupMapping {
    fn is_consistent(&self) -> bool {
        self.pattern.is_some() || (self.group.is_none() && self.result_pattern.is_none())
    }

    fn to_attributes(&self) -> Value {
        let mut attributes = Map::new();
        attributes.insert("username-attribute".to_string(), json!("uid"));
        if let Some(pattern) = &self.pattern {
            attributes.insert("pattern".to_string(), json!(pattern));
        }
        if let Some(group) = self.group {
            attributes.insert("group".to_string(), json!(group));
        }
        if let Some(result_pattern) = &self.result_pattern {
            attributes.insert("result-pattern".to_string(), json!(result_pattern));
        }
        Value::Object(attributes)
    }
}

prop_compose! {
    fn group_mapping_strategy()
        (pattern in prop::option::of("[A-Z]{1,3}=\\(\\.\\*\\?\\),\\.\\*"),
         group in prop::option::of(1i64..=9),
         result_pattern in prop::option::of("\\{[1-9]\\}"))
        -> GroupMapping {
        GroupMapping { pattern, group, result_pattern }
    }
}

fn assert_stored_model_consistent(stored: &Value) {
    let defined = |name: &str| stored.get(name).is_some_and(|v| !v.is_null());
    if defined("group") || defined("result-pattern") {
        assert!(defined("pattern"), "stored model breaks a dependency: {}", stored);
    }
}

proptest! {
    #[test]
    fn test_validation_is_deterministic(mapping in group_mapping_strategy()) {
        let definition = ldap_authorization_definition().unwrap();
        let attributes = mapping.to_attributes();
        let attributes = attributes.as_object().unwrap();

        let first = definition.validate_model(attributes, true);
        let second = definition.validate_model(attributes, true);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_add_accepts_exactly_consistent_mappings(mapping in group_mapping_strategy()) {
        tokio_test::block_on(async {
            let (controller, _) = common::controller_with_realm().await;
            let ldap = common::ldap_address(REALM);

            let result = controller.add(&ldap, mapping.to_attributes()).await;
            let stored = common::stored_attributes(&controller, &ldap).await;

            assert_eq!(result.is_ok(), mapping.is_consistent(), "{:?}", result);
            match stored {
                Some(stored) => {
                    assert_eq!(stored, mapping.to_attributes());
                    assert_stored_model_consistent(&stored);
                }
                None => assert!(result.is_err()),
            }
        });
    }

    #[test]
    fn test_single_writes_preserve_dependencies(
        initial in group_mapping_strategy(),
        attribute in prop::sample::select(vec!["pattern", "group", "result-pattern"]),
        clear in any::<bool>(),
        group in 1i64..=9
    ) {
        prop_assume!(initial.is_consistent());

        tokio_test::block_on(async {
            let (controller, ldap) = common::controller_with_ldap(initial.to_attributes()).await;
            let before = common::stored_attributes(&controller, &ldap).await.unwrap();

            let value = match (clear, attribute) {
                (true, _) => Value::Null,
                (false, "group") => json!(group),
                (false, "pattern") => json!("CN=(.*?),.*"),
                (false, _) => json!("{1}"),
            };
            let result = controller.write_attribute(&ldap, attribute, value).await;
            let after = common::stored_attributes(&controller, &ldap).await.unwrap();

            assert_stored_model_consistent(&after);
            if result.is_err() {
                assert_eq!(after, before);
            }
        });
    }
}
