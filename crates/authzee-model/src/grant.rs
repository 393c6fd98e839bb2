//! I define the grant type and its validation-mode enums.
//!

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a grant's effect is to allow or deny a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// The grant, if applicable, authorizes the request.
    Allow,
    /// The grant, if applicable, vetoes the request.
    Deny,
}

/// How failures to evaluate a grant's `query` are reported.
///
/// > `query_validation` ∈ {validate, error, critical}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryValidation {
    /// Silently treat the grant as not applicable.
    Validate,
    /// Treat the grant as not applicable and record a non-critical
    /// [`crate::error::ErrorEntry::JMESPath`] error.
    Error,
    /// Treat the grant as not applicable, record a critical
    /// [`crate::error::ErrorEntry::JMESPath`] error, and halt the workflow.
    Critical,
}

/// How failures to validate `request.context` against a grant's
/// `context_schema` are reported.
///
/// > `context_validation` ∈ {none, validate, error, critical}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextValidation {
    /// Skip context validation entirely; the grant remains eligible.
    None,
    /// Silently treat the grant as not applicable on failure.
    Validate,
    /// Treat the grant as not applicable and record a non-critical
    /// [`crate::error::ErrorEntry::Context`] error.
    Error,
    /// Treat the grant as not applicable, record a critical
    /// [`crate::error::ErrorEntry::Context`] error, and halt the workflow.
    Critical,
}

/// An allow/deny rule carrying a query expression.
///
/// Grants are immutable value objects: the engine never mutates one after
/// it is handed an evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// Whether this grant allows or denies matching requests.
    pub effect: Effect,

    /// Set of actions this grant participates in. An empty set means
    /// "every action of every defined resource" (§4.4 step 1, §8 P7).
    pub actions: BTreeSet<String>,

    /// JMESPath expression evaluated against the query-input (§6) to
    /// produce the value compared against [`Self::equality`].
    pub query: String,

    /// How a query evaluation failure is reported.
    pub query_validation: QueryValidation,

    /// The value the query result must deep-equal for this grant to be
    /// applicable.
    pub equality: Value,

    /// Opaque data exposed to the query, otherwise untouched by the engine.
    pub data: Value,

    /// JSON Schema validating `request.context`.
    pub context_schema: Value,

    /// How a context-schema validation failure is reported.
    pub context_validation: ContextValidation,
}

impl Grant {
    /// A grant whose `actions` set is empty participates in every action of
    /// every defined resource (§4.4 step 1).
    #[must_use]
    pub fn gates_every_action(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether this grant's action gate passes for `action` (§4.4 step 1).
    #[must_use]
    pub fn action_gate_passes(&self, action: &str) -> bool {
        self.gates_every_action() || self.actions.iter().any(|a| a == action)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn grant_with_actions(actions: &[&str]) -> Grant {
        Grant {
            effect: Effect::Allow,
            actions: actions.iter().map(|a| a.to_string()).collect(),
            query: "`true`".to_string(),
            query_validation: QueryValidation::Error,
            equality: json!(true),
            data: json!({}),
            context_schema: json!({"type": "object"}),
            context_validation: ContextValidation::None,
        }
    }

    #[test]
    fn empty_actions_gate_is_vacuous() {
        let grant = grant_with_actions(&[]);
        assert!(grant.gates_every_action());
        assert!(grant.action_gate_passes("pop"));
        assert!(grant.action_gate_passes("anything"));
    }

    #[rstest]
    #[case::matching("pop", true)]
    #[case::not_matching("inflate", false)]
    fn non_empty_actions_gate_matches_exactly(#[case] action: &str, #[case] expected: bool) {
        let grant = grant_with_actions(&["pop"]);
        assert_eq!(grant.action_gate_passes(action), expected);
    }

    #[test]
    fn effect_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Effect::Allow).unwrap(), json!("allow"));
        assert_eq!(serde_json::to_value(Effect::Deny).unwrap(), json!("deny"));
    }
}
