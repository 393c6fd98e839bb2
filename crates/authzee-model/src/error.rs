//! I define the error entry and error bundle types (§3, §7).
//!

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grant::Grant;

/// Which kind of definition a [`DefinitionError`] concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    /// The offending definition was an `IdentityDef`.
    Identity,
    /// The offending definition was a `ResourceDef`.
    Resource,
}

/// An error raised by the Definition Validator (C1). Always `critical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Always `true` (§4.1: "All definition errors are `critical=true`").
    pub critical: bool,
    /// Whether the offending definition was an identity or resource def.
    pub definition_type: DefinitionKind,
    /// The raw, as-submitted definition.
    pub definition: Value,
}

/// An error raised by the grant-schema check in C3. Always `critical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Always `true`.
    pub critical: bool,
    /// The raw, as-submitted grant.
    pub grant: Value,
}

/// An error raised by the request-schema check in C3. Always `critical`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Always `true`.
    pub critical: bool,
}

/// An error raised by C4's context-schema validation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextError {
    /// Human-readable description of the violation.
    pub message: String,
    /// `true` iff the grant's (or request's) `context_validation` mode was
    /// `critical`.
    pub critical: bool,
    /// The grant whose context-schema check failed.
    pub grant: Grant,
}

/// An error raised by C4's JMESPath query-evaluation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JmesPathError {
    /// Human-readable description of the violation.
    pub message: String,
    /// `true` iff the grant's (or request's) `query_validation` mode was
    /// `critical`.
    pub critical: bool,
    /// The grant whose query evaluation failed.
    pub grant: Grant,
}

/// A single error, tagged by origin (§3).
///
/// This is the unit components pass around before it is filed into the
/// matching array of an [`ErrorBundle`]; the bundle itself never stores a
/// mixed `Vec<ErrorEntry>`, only the five per-kind arrays described in §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ErrorEntry {
    /// A C4 context-validation failure.
    Context(ContextError),
    /// A C1 definition-validation failure.
    Definition(DefinitionError),
    /// A C3 grant-schema failure.
    Grant(GrantError),
    /// A C4 JMESPath evaluation failure.
    #[serde(rename = "jmespath")]
    JMESPath(JmesPathError),
    /// A C3 request-schema failure.
    Request(RequestError),
}

impl ErrorEntry {
    /// Whether this error is critical (§7: forces the enclosing workflow to
    /// return with `completed=false`).
    #[must_use]
    pub fn is_critical(&self) -> bool {
        match self {
            ErrorEntry::Context(e) => e.critical,
            ErrorEntry::Definition(e) => e.critical,
            ErrorEntry::Grant(e) => e.critical,
            ErrorEntry::JMESPath(e) => e.critical,
            ErrorEntry::Request(e) => e.critical,
        }
    }
}

/// The five ordered error arrays accumulated during a workflow call (§3).
///
/// Each array is always present, possibly empty; insertion order within an
/// array is observation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBundle {
    /// Errors from C4's context-schema validation step.
    #[serde(default)]
    pub context: Vec<ContextError>,
    /// Errors from C1's definition validation.
    #[serde(default)]
    pub definition: Vec<DefinitionError>,
    /// Errors from C3's grant-schema check.
    #[serde(default)]
    pub grant: Vec<GrantError>,
    /// Errors from C4's JMESPath evaluation step.
    #[serde(default)]
    pub jmespath: Vec<JmesPathError>,
    /// Errors from C3's request-schema check.
    #[serde(default)]
    pub request: Vec<RequestError>,
}

impl ErrorBundle {
    /// A bundle with all five arrays empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File `entry` into the array matching its kind, preserving insertion
    /// order within that array.
    pub fn push(&mut self, entry: ErrorEntry) {
        match entry {
            ErrorEntry::Context(e) => self.context.push(e),
            ErrorEntry::Definition(e) => self.definition.push(e),
            ErrorEntry::Grant(e) => self.grant.push(e),
            ErrorEntry::JMESPath(e) => self.jmespath.push(e),
            ErrorEntry::Request(e) => self.request.push(e),
        }
    }

    /// Whether any array holds at least one `critical=true` entry (§3, §8
    /// P4).
    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.context.iter().any(|e| e.critical)
            || self.definition.iter().any(|e| e.critical)
            || self.grant.iter().any(|e| e.critical)
            || self.jmespath.iter().any(|e| e.critical)
            || self.request.iter().any(|e| e.critical)
    }

    /// Whether every array is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
            && self.definition.is_empty()
            && self.grant.is_empty()
            && self.jmespath.is_empty()
            && self.request.is_empty()
    }

    /// Append every array of `other` onto the matching array of `self`,
    /// preserving the relative order of each source bundle (used to combine
    /// the independently-run grant and request checks of §4.3).
    pub fn merge(&mut self, other: ErrorBundle) {
        self.context.extend(other.context);
        self.definition.extend(other.definition);
        self.grant.extend(other.grant);
        self.jmespath.extend(other.jmespath);
        self.request.extend(other.request);
    }
}
