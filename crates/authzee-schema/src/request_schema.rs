//! I build the generated Request schema (§4.2, §6).
//!

use authzee_model::{IdentityDef, ResourceDef};
use serde_json::{json, Map, Value};

/// The request schema: a top-level `anyOf` across resource types, each
/// branch referencing shared `$defs` for resource schemas, identities, and
/// the validation-mode enums (§4.2).
#[must_use]
pub fn request_schema(identity_defs: &[IdentityDef], resource_defs: &[ResourceDef]) -> Value {
    let mut defs = Map::new();

    for resource_def in resource_defs {
        defs.insert(resource_def.resource_type.clone(), resource_def.schema.clone());
    }

    defs.insert("identities".to_string(), identities_def(identity_defs));
    defs.insert(
        "query_validation".to_string(),
        json!({ "enum": ["grant", "validate", "error", "critical"] }),
    );
    defs.insert(
        "context".to_string(),
        json!({
            "type": "object",
            "propertyNames": { "pattern": "^[a-zA-Z0-9_]{1,256}$" },
        }),
    );
    defs.insert(
        "context_validation".to_string(),
        json!({ "enum": ["grant", "none", "validate", "error", "critical"] }),
    );

    let branches: Vec<Value> = resource_defs.iter().map(resource_branch).collect();

    json!({
        "$defs": Value::Object(defs),
        "anyOf": branches,
    })
}

fn identities_def(identity_defs: &[IdentityDef]) -> Value {
    let mut names: Vec<&str> = identity_defs.iter().map(|d| d.identity_type.as_str()).collect();
    names.sort_unstable();

    let mut properties = Map::new();
    for def in identity_defs {
        properties.insert(
            def.identity_type.clone(),
            json!({ "type": "array", "items": def.schema.clone() }),
        );
    }

    json!({
        "type": "object",
        "additionalProperties": false,
        "required": names,
        "properties": Value::Object(properties),
    })
}

fn resource_branch(resource_def: &ResourceDef) -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "identities",
            "resource_type",
            "action",
            "resource",
            "parents",
            "children",
            "query_validation",
            "context",
            "context_validation",
        ],
        "properties": {
            "identities": { "$ref": "#/$defs/identities" },
            "resource_type": { "const": resource_def.resource_type },
            "action": { "enum": resource_def.actions },
            "resource": { "$ref": format!("#/$defs/{}", resource_def.resource_type) },
            "parents": related_resources_def(&resource_def.parent_types),
            "children": related_resources_def(&resource_def.child_types),
            "query_validation": { "$ref": "#/$defs/query_validation" },
            "context": { "$ref": "#/$defs/context" },
            "context_validation": { "$ref": "#/$defs/context_validation" },
        },
    })
}

fn related_resources_def(related_types: &std::collections::BTreeSet<String>) -> Value {
    let required: Vec<&str> = related_types.iter().map(String::as_str).collect();
    let mut properties = Map::new();
    for related_type in related_types {
        properties.insert(
            related_type.clone(),
            json!({
                "type": "array",
                "items": { "$ref": format!("#/$defs/{related_type}") },
            }),
        );
    }
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": required,
        "properties": Value::Object(properties),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn balloon() -> ResourceDef {
        ResourceDef {
            resource_type: "Balloon".to_string(),
            actions: vec!["pop".to_string(), "inflate".to_string()],
            schema: json!({"type": "object", "required": ["size"]}),
            parent_types: BTreeSet::from(["Bag".to_string()]),
            child_types: BTreeSet::new(),
        }
    }

    fn bag() -> ResourceDef {
        ResourceDef {
            resource_type: "Bag".to_string(),
            actions: vec!["carry".to_string()],
            schema: json!({"type": "object"}),
            parent_types: BTreeSet::new(),
            child_types: BTreeSet::from(["Balloon".to_string()]),
        }
    }

    fn user() -> IdentityDef {
        IdentityDef {
            identity_type: "User".to_string(),
            schema: json!({"type": "object", "required": ["role"]}),
        }
    }

    #[test]
    fn produces_one_anyof_branch_per_resource_def() {
        let schema = request_schema(&[user()], &[balloon(), bag()]);
        assert_eq!(schema["anyOf"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn branch_const_and_action_enum_match_the_def() {
        let schema = request_schema(&[user()], &[balloon()]);
        let branch = &schema["anyOf"][0];
        assert_eq!(branch["properties"]["resource_type"]["const"], json!("Balloon"));
        assert_eq!(
            branch["properties"]["action"]["enum"],
            json!(["pop", "inflate"])
        );
    }

    #[test]
    fn parents_required_matches_exactly_the_parent_types() {
        let schema = request_schema(&[user()], &[balloon()]);
        let parents = &schema["anyOf"][0]["properties"]["parents"];
        assert_eq!(parents["required"], json!(["Bag"]));
        assert_eq!(parents["additionalProperties"], json!(false));
    }

    #[test]
    fn identities_required_is_the_sorted_list_of_every_identity_type() {
        let mut second_identity = user();
        second_identity.identity_type = "Agent".to_string();
        let schema = request_schema(&[user(), second_identity], &[balloon()]);
        assert_eq!(schema["$defs"]["identities"]["required"], json!(["Agent", "User"]));
    }

    #[test]
    fn resource_ref_points_to_the_defs_entry_for_its_own_type() {
        let schema = request_schema(&[], &[balloon()]);
        assert_eq!(
            schema["anyOf"][0]["properties"]["resource"]["$ref"],
            json!("#/$defs/Balloon")
        );
        assert_eq!(schema["$defs"]["Balloon"], balloon().schema);
    }

    #[test]
    fn is_deterministic() {
        let a = request_schema(&[user()], &[balloon(), bag()]);
        let b = request_schema(&[user()], &[balloon(), bag()]);
        assert_eq!(a, b);
    }
}
