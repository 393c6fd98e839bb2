//! I build the generated Grant schema (§4.2, §6).
//!

use authzee_model::ResourceDef;
use serde_json::{json, Value};

use crate::actions::action_union;

/// The grant schema: a fixed template whose `properties.actions.items.enum`
/// is the deterministic union of all action names across `resource_defs`
/// (§4.2).
#[must_use]
pub fn grant_schema(resource_defs: &[ResourceDef]) -> Value {
    let actions = action_union(resource_defs);
    json!({
        "type": "object",
        "required": [
            "effect",
            "actions",
            "query",
            "query_validation",
            "equality",
            "data",
            "context_schema",
            "context_validation",
        ],
        "additionalProperties": false,
        "properties": {
            "effect": { "enum": ["allow", "deny"] },
            "actions": {
                "type": "array",
                "uniqueItems": true,
                "items": { "enum": actions },
            },
            "query": { "type": "string" },
            "query_validation": { "enum": ["validate", "error", "critical"] },
            "equality": {},
            "data": { "type": "object" },
            "context_schema": { "type": "object" },
            "context_validation": { "enum": ["none", "validate", "error", "critical"] },
        },
    })
}
