//! I define the collaborator traits through which the engine calls out to an
//! externally-owned JSON Schema validator and JMESPath search function (§1,
//! §9 "Callback for JMESPath").
//!
//! Neither collaborator is implemented by this crate by default: both are
//! out of scope per spec §1, and are supplied by the host exactly the way
//! `acp::attribute_match_svc::AttributeMatchService` is handed to
//! [`acp::engine::AcpEngine`] rather than implemented inside it. Enabling
//! the `builtin-validator` / `builtin-jmespath` features provides a
//! reference implementation over real crates for hosts that don't already
//! own one.

use serde_json::Value;

#[cfg(any(feature = "builtin-validator", feature = "builtin-jmespath"))]
pub mod impl_;

/// Validates a JSON instance against a JSON Schema (Draft 2020-12).
///
/// This is a pure boundary: the engine never inspects *why* validation
/// failed beyond the message it is given.
pub trait SchemaValidator: Send + Sync {
    /// Validate `instance` against `schema`. On failure, return a
    /// human-readable description of a violation (implementations may
    /// coalesce multiple violations into one message, per §4.3).
    fn validate(&self, schema: &Value, instance: &Value) -> Result<(), String>;
}

/// A JMESPath search callback (§6 "Query-input shape").
///
/// > A function parameter is used so hosts can add custom functions.
pub trait JmesPathSearch: Send + Sync {
    /// Evaluate `expression` against `data`, returning the resulting value,
    /// or a description of the search failure.
    fn search(&self, expression: &str, data: &Value) -> Result<Value, String>;
}
