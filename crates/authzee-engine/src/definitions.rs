//! I implement the Definition Validator (C1, §4.1).
//!

use std::collections::HashSet;

use authzee_model::{error::DefinitionError, DefinitionKind, ErrorBundle, ErrorEntry, IdentityDef, ResourceDef};
use serde_json::json;

use crate::collab::SchemaValidator;

/// The IdentityDef meta-schema (§6).
fn identity_def_meta_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["identity_type", "schema"],
        "additionalProperties": false,
        "properties": {
            "identity_type": { "type": "string", "pattern": "^[A-Za-z0-9_]{1,256}$" },
            "schema": { "type": "object" },
        },
    })
}

/// The ResourceDef meta-schema (§6).
fn resource_def_meta_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["resource_type", "actions", "schema", "parent_types", "child_types"],
        "additionalProperties": false,
        "properties": {
            "resource_type": { "type": "string", "pattern": "^[A-Za-z0-9_]{1,256}$" },
            "actions": {
                "type": "array",
                "minItems": 1,
                "uniqueItems": true,
                "items": { "type": "string", "pattern": "^[A-Za-z0-9_.:\\-]{1,512}$" },
            },
            "schema": { "type": "object" },
            "parent_types": { "type": "array", "uniqueItems": true, "items": { "type": "string" } },
            "child_types": { "type": "array", "uniqueItems": true, "items": { "type": "string" } },
        },
    })
}

/// Run every C1 check, in the order prescribed by §4.1, and return the
/// accumulated bundle. Every definition is checked regardless of whether an
/// earlier one failed; all errors produced here are `critical=true`.
pub fn validate_definitions(
    identity_defs: &[IdentityDef],
    resource_defs: &[ResourceDef],
    schema_validator: &dyn SchemaValidator,
) -> ErrorBundle {
    let mut errors = ErrorBundle::new();

    // 1. Identity defs against the meta-schema.
    let identity_meta_schema = identity_def_meta_schema();
    for identity_def in identity_defs {
        let raw = serde_json::to_value(identity_def).unwrap_or(json!(null));
        if let Err(message) = schema_validator.validate(&identity_meta_schema, &raw) {
            errors.push(ErrorEntry::Definition(DefinitionError {
                message,
                critical: true,
                definition_type: DefinitionKind::Identity,
                definition: raw,
            }));
        }
    }

    // 2. identity_type uniqueness.
    let mut seen_identity_types = HashSet::new();
    for identity_def in identity_defs {
        if !seen_identity_types.insert(identity_def.identity_type.as_str()) {
            errors.push(ErrorEntry::Definition(DefinitionError {
                message: format!(
                    "duplicate identity_type {:?}",
                    identity_def.identity_type
                ),
                critical: true,
                definition_type: DefinitionKind::Identity,
                definition: serde_json::to_value(identity_def).unwrap_or(json!(null)),
            }));
        }
    }

    // 3. Resource defs against the meta-schema.
    let resource_meta_schema = resource_def_meta_schema();
    for resource_def in resource_defs {
        let raw = serde_json::to_value(resource_def).unwrap_or(json!(null));
        if let Err(message) = schema_validator.validate(&resource_meta_schema, &raw) {
            errors.push(ErrorEntry::Definition(DefinitionError {
                message,
                critical: true,
                definition_type: DefinitionKind::Resource,
                definition: raw,
            }));
        }
    }

    // 4. resource_type uniqueness.
    let mut seen_resource_types = HashSet::new();
    for resource_def in resource_defs {
        if !seen_resource_types.insert(resource_def.resource_type.as_str()) {
            errors.push(ErrorEntry::Definition(DefinitionError {
                message: format!(
                    "duplicate resource_type {:?}",
                    resource_def.resource_type
                ),
                critical: true,
                definition_type: DefinitionKind::Resource,
                definition: serde_json::to_value(resource_def).unwrap_or(json!(null)),
            }));
        }
    }

    // 5. Referential integrity of parent_types/child_types.
    let known_resource_types: HashSet<&str> =
        resource_defs.iter().map(|d| d.resource_type.as_str()).collect();
    for resource_def in resource_defs {
        for related in resource_def.parent_types.iter().chain(resource_def.child_types.iter()) {
            if !known_resource_types.contains(related.as_str()) {
                errors.push(ErrorEntry::Definition(DefinitionError {
                    message: format!(
                        "resource_type {:?} references unknown related resource_type {:?}",
                        resource_def.resource_type, related
                    ),
                    critical: true,
                    definition_type: DefinitionKind::Resource,
                    definition: serde_json::to_value(resource_def).unwrap_or(json!(null)),
                }));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use authzee_model::IdentityDef;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    struct AlwaysValid;
    impl SchemaValidator for AlwaysValid {
        fn validate(&self, _schema: &serde_json::Value, _instance: &serde_json::Value) -> Result<(), String> {
            Ok(())
        }
    }

    struct AlwaysInvalid;
    impl SchemaValidator for AlwaysInvalid {
        fn validate(&self, _schema: &serde_json::Value, _instance: &serde_json::Value) -> Result<(), String> {
            Err("always fails".to_string())
        }
    }

    fn user() -> IdentityDef {
        IdentityDef {
            identity_type: "User".to_string(),
            schema: json!({"type": "object"}),
        }
    }

    fn balloon() -> ResourceDef {
        ResourceDef {
            resource_type: "Balloon".to_string(),
            actions: vec!["pop".to_string()],
            schema: json!({"type": "object"}),
            parent_types: BTreeSet::new(),
            child_types: BTreeSet::new(),
        }
    }

    #[test]
    fn well_formed_definitions_produce_no_errors() {
        let errors = validate_definitions(&[user()], &[balloon()], &AlwaysValid);
        assert!(errors.is_empty());
    }

    #[test]
    fn meta_schema_failure_is_critical_and_tagged_by_kind() {
        let errors = validate_definitions(&[user()], &[], &AlwaysInvalid);
        assert_eq!(errors.definition.len(), 1);
        assert!(errors.definition[0].critical);
        assert_eq!(errors.definition[0].definition_type, DefinitionKind::Identity);
    }

    #[test]
    fn duplicate_identity_type_is_reported_once_per_extra_occurrence() {
        let errors = validate_definitions(&[user(), user(), user()], &[], &AlwaysValid);
        // Two duplicates beyond the first occurrence.
        let duplicate_messages = errors
            .definition
            .iter()
            .filter(|e| e.message.contains("duplicate"))
            .count();
        assert_eq!(duplicate_messages, 2);
    }

    #[test]
    fn duplicate_resource_type_is_reported() {
        let errors = validate_definitions(&[], &[balloon(), balloon()], &AlwaysValid);
        assert_eq!(
            errors
                .definition
                .iter()
                .filter(|e| e.message.contains("duplicate"))
                .count(),
            1
        );
    }

    #[rstest]
    fn missing_related_resource_type_is_reported() {
        let mut bag = balloon();
        bag.resource_type = "Bag".to_string();
        bag.parent_types = BTreeSet::from(["Warehouse".to_string()]);
        let errors = validate_definitions(&[], &[bag], &AlwaysValid);
        assert_eq!(errors.definition.len(), 1);
        assert!(errors.definition[0].message.contains("Warehouse"));
    }

    #[test]
    fn every_definition_is_checked_even_after_an_earlier_failure() {
        // Both identity and resource meta-schema checks run regardless of
        // each other's outcome.
        let errors = validate_definitions(&[user()], &[balloon()], &AlwaysInvalid);
        assert_eq!(errors.definition.len(), 2);
    }
}
