//! I build the generated Error schema (§4.2, §6).
//!

use authzee_model::ResourceDef;
use serde_json::{json, Value};

use crate::grant_schema::grant_schema;

/// The error schema: a fixed template whose internal `$defs.grant` slot is
/// set to the freshly generated Grant schema (§4.2).
#[must_use]
pub fn error_schema(resource_defs: &[ResourceDef]) -> Value {
    json!({
        "$defs": {
            "grant": grant_schema(resource_defs),
        },
        "type": "object",
        "required": ["context", "definition", "grant", "jmespath", "request"],
        "additionalProperties": false,
        "properties": {
            "context": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["message", "critical", "grant"],
                    "additionalProperties": false,
                    "properties": {
                        "message": { "type": "string" },
                        "critical": { "type": "boolean" },
                        "grant": { "$ref": "#/$defs/grant" },
                    },
                },
            },
            "definition": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["message", "critical", "definition_type", "definition"],
                    "additionalProperties": false,
                    "properties": {
                        "message": { "type": "string" },
                        "critical": { "type": "boolean" },
                        "definition_type": { "enum": ["identity", "resource"] },
                        "definition": {},
                    },
                },
            },
            "grant": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["message", "critical", "grant"],
                    "additionalProperties": false,
                    "properties": {
                        "message": { "type": "string" },
                        "critical": { "type": "boolean" },
                        "grant": {},
                    },
                },
            },
            "jmespath": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["message", "critical", "grant"],
                    "additionalProperties": false,
                    "properties": {
                        "message": { "type": "string" },
                        "critical": { "type": "boolean" },
                        "grant": { "$ref": "#/$defs/grant" },
                    },
                },
            },
            "request": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["message", "critical"],
                    "additionalProperties": false,
                    "properties": {
                        "message": { "type": "string" },
                        "critical": { "type": "boolean" },
                    },
                },
            },
        },
    })
}
