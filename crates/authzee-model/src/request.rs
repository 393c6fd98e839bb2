//! I define the request type and its validation-mode enums.
//!

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The query-validation mode as it appears on a request: either an explicit
/// mode, or `grant`, meaning "defer to the grant's own `query_validation`".
///
/// > `query_validation` ∈ {grant, validate, error, critical}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestQueryValidation {
    /// Use the grant's own `query_validation` mode (§4.4 step 5).
    Grant,
    /// Silently treat the grant as not applicable.
    Validate,
    /// Treat the grant as not applicable and record a non-critical error.
    Error,
    /// Treat the grant as not applicable, record a critical error, and halt.
    Critical,
}

/// The context-validation mode as it appears on a request: either an
/// explicit mode, or `grant`, meaning "defer to the grant's own
/// `context_validation`".
///
/// > `context_validation` ∈ {grant, none, validate, error, critical}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestContextValidation {
    /// Use the grant's own `context_validation` mode (§4.4 step 2).
    Grant,
    /// Skip context validation entirely.
    None,
    /// Silently treat the grant as not applicable.
    Validate,
    /// Treat the grant as not applicable and record a non-critical error.
    Error,
    /// Treat the grant as not applicable, record a critical error, and halt.
    Critical,
}

/// A request naming identities, a resource, an action, related resources,
/// and context data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Mapping from identity-type name to an ordered sequence of identity
    /// objects. Identity types absent from this map behave as if they were
    /// present with an empty sequence (§3, §8 boundary behavior).
    #[serde(default)]
    pub identities: BTreeMap<String, Vec<Value>>,

    /// The resource type this request targets.
    pub resource_type: String,

    /// The action being requested.
    pub action: String,

    /// The target resource object.
    pub resource: Value,

    /// Mapping from each declared parent type of `resource_type` to a
    /// sequence of parent resource objects. Keys must be exactly the
    /// `parent_types` of the matching `ResourceDef`.
    #[serde(default)]
    pub parents: BTreeMap<String, Vec<Value>>,

    /// Mapping from each declared child type of `resource_type` to a
    /// sequence of child resource objects. Keys must be exactly the
    /// `child_types` of the matching `ResourceDef`.
    #[serde(default)]
    pub children: BTreeMap<String, Vec<Value>>,

    /// How per-grant query-evaluation failures are reported for this
    /// request, unless overridden by `RequestQueryValidation::Grant`.
    pub query_validation: RequestQueryValidation,

    /// Context object; keys must match `[a-zA-Z0-9_]{1,256}`.
    #[serde(default)]
    pub context: Value,

    /// How per-grant context-validation failures are reported for this
    /// request, unless overridden by `RequestContextValidation::Grant`.
    pub context_validation: RequestContextValidation,
}

impl Request {
    /// Get the ordered sequence of identity objects for `identity_type`,
    /// defaulting to an empty slice when the type is absent from
    /// [`Self::identities`] (§8 boundary behavior).
    #[must_use]
    pub fn identities_of(&self, identity_type: &str) -> &[Value] {
        self.identities
            .get(identity_type)
            .map_or(&[][..], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_identity_type_behaves_as_empty_sequence() {
        let request = Request {
            identities: BTreeMap::new(),
            resource_type: "Balloon".to_string(),
            action: "pop".to_string(),
            resource: json!({}),
            parents: BTreeMap::new(),
            children: BTreeMap::new(),
            query_validation: RequestQueryValidation::Grant,
            context: json!({}),
            context_validation: RequestContextValidation::Grant,
        };
        assert!(request.identities_of("User").is_empty());
    }

    #[test]
    fn present_identity_type_is_returned_in_order() {
        let mut identities = BTreeMap::new();
        identities.insert(
            "User".to_string(),
            vec![json!({"role": "admin"}), json!({"role": "guest"})],
        );
        let request = Request {
            identities,
            resource_type: "Balloon".to_string(),
            action: "pop".to_string(),
            resource: json!({}),
            parents: BTreeMap::new(),
            children: BTreeMap::new(),
            query_validation: RequestQueryValidation::Grant,
            context: json!({}),
            context_validation: RequestContextValidation::Grant,
        };
        assert_eq!(request.identities_of("User")[0]["role"], json!("admin"));
    }
}
