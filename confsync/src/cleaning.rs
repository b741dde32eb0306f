//! Per-type payload cleaning
//!
//! Removes backend-generated fields from exported objects and repairs
//! fields that do not carry across instances, so the payload is valid for
//! replay into a destination backend.

use serde_json::{json, Map, Value};
use tracing::debug;

/// Remove backend-specific keys from an object before import.
///
/// Non-object payloads pass through untouched.
pub fn clean_for_import(item: Value, config_type: &str) -> Value {
    let mut map = match item {
        Value::Object(map) => map,
        other => return other,
    };

    // `scope` is set by the source backend on every payload and is
    // meaningless at the destination.
    let mut keys_to_remove: Vec<&str> = vec!["scope"];

    match config_type {
        "global-custom-payloads" => keys_to_remove.extend(["lastUpdated", "version"]),
        "sli" | "custom-event-specifications" => keys_to_remove.push("lastUpdated"),
        // Keep the id: the update-by-id strategy needs it in the URL and payload.
        "maintenance" => {
            keys_to_remove.extend(["lastUpdated", "state", "validVersion", "occurrence", "invalid"])
        }
        // Groups are always created fresh, never updated by id.
        "groups" => keys_to_remove.push("id"),
        _ => {}
    }

    for key in keys_to_remove {
        if map.remove(key).is_some() {
            debug!("Removed '{}' from {} payload", key, config_type);
        }
    }

    if config_type == "custom-dashboards" {
        clean_dashboard(&mut map);
    }

    if config_type == "manual-services" {
        clean_manual_service(&mut map);
    }

    Value::Object(map)
}

fn rule_field<'a>(rule: &'a Value, key: &str) -> Option<&'a str> {
    rule.get(key).and_then(Value::as_str)
}

/// Dashboard owners and USER access rules reference identities local to the
/// source instance; strip them and guarantee the dashboard stays reachable.
fn clean_dashboard(map: &mut Map<String, Value>) {
    debug!("Cleaning custom dashboard-specific fields");

    if map.remove("ownerId").is_some() {
        debug!("Removed ownerId");
    }

    if let Some(Value::Array(rules)) = map.get_mut("accessRules") {
        let original_count = rules.len();
        rules.retain(|rule| rule_field(rule, "relationType") != Some("USER"));
        if rules.len() != original_count {
            debug!("Removed {} USER access rules", original_count - rules.len());
        }

        let has_global_read = rules.iter().any(|rule| {
            rule_field(rule, "relationType") == Some("GLOBAL")
                && rule_field(rule, "accessType") == Some("READ")
        });
        if !has_global_read {
            rules.push(json!({"accessType": "READ", "relationType": "GLOBAL"}));
            debug!("Added default GLOBAL READ access rule");
        }

        let has_write_access = rules
            .iter()
            .any(|rule| rule_field(rule, "accessType") == Some("READ_WRITE"));
        if !has_write_access {
            rules.push(json!({"accessType": "READ_WRITE", "relationType": "GLOBAL"}));
            debug!("Added default GLOBAL READ_WRITE access rule");
        }
    }
}

/// A tag filter that is not a structured expression with an `operator` is a
/// leftover the destination rejects; drop it rather than forward it.
fn clean_manual_service(map: &mut Map<String, Value>) {
    let is_invalid = match map.get("tagFilterExpression") {
        None => false,
        Some(Value::Object(expr)) => matches!(expr.get("operator"), None | Some(Value::Null)),
        Some(_) => true,
    };

    if is_invalid {
        debug!("Cleaning manual-service-specific fields");
        map.remove("tagFilterExpression");
        debug!("Removed invalid tagFilterExpression");
    }
}
