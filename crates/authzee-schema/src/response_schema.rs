//! I build the generated Audit and Authorize response schemas (§6).
//!

use authzee_model::ResourceDef;
use serde_json::{json, Map, Value};

use crate::{error_schema::error_schema, grant_schema::grant_schema};

/// The Audit response schema: `{completed, grants, errors}` where `grants`
/// is an array of grant objects and `errors` is the Error schema body
/// (§6: "without the `$defs` wrapper" — the `$defs.grant` slot is hoisted
/// to this schema's own root instead, since `$ref`s resolve against the
/// document root regardless of nesting depth).
#[must_use]
pub fn audit_response_schema(resource_defs: &[ResourceDef]) -> Value {
    json!({
        "$defs": { "grant": grant_schema(resource_defs) },
        "type": "object",
        "required": ["completed", "grants", "errors"],
        "additionalProperties": false,
        "properties": {
            "completed": { "type": "boolean" },
            "grants": {
                "type": "array",
                "items": { "$ref": "#/$defs/grant" },
            },
            "errors": error_body(resource_defs),
        },
    })
}

/// The Authorize response schema: `{authorized, completed, grant, message,
/// errors}` where `grant` is either the grant schema or `null`.
#[must_use]
pub fn authorize_response_schema(resource_defs: &[ResourceDef]) -> Value {
    json!({
        "$defs": { "grant": grant_schema(resource_defs) },
        "type": "object",
        "required": ["authorized", "completed", "grant", "message", "errors"],
        "additionalProperties": false,
        "properties": {
            "authorized": { "type": "boolean" },
            "completed": { "type": "boolean" },
            "grant": {
                "anyOf": [{ "$ref": "#/$defs/grant" }, { "type": "null" }],
            },
            "message": { "type": "string" },
            "errors": error_body(resource_defs),
        },
    })
}

/// The Error schema (§4.2) is defined with its own top-level `$defs.grant`;
/// response schemas need the same body nested under `properties.errors`,
/// sharing their own root `$defs.grant` instead, so we strip the nested
/// `$defs` key.
fn error_body(resource_defs: &[ResourceDef]) -> Value {
    let mut body = match error_schema(resource_defs) {
        Value::Object(map) => map,
        _ => unreachable!("error_schema always returns an object"),
    };
    body.remove("$defs");
    Value::Object(body as Map<String, Value>)
}
