//! I define the identity type definition.
//!

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// An identity type definition.
///
/// > `identity_type` (unique non-empty token, chars `[A-Za-z0-9_]`, max 256)
/// > and `schema` (a JSON Schema document). Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDef {
    /// Name of the identity type, e.g. `"User"`.
    pub identity_type: String,

    /// JSON Schema that every object of this identity type must validate
    /// against.
    pub schema: Value,
}

impl IdentityDef {
    /// Check that [`Self::identity_type`] is `1..=256` characters drawn
    /// from `[A-Za-z0-9_]`.
    ///
    /// This is the token-shape half of the IdentityDef meta-schema (§6); the
    /// `schema`-is-a-valid-JSON-Schema half is delegated to the injected
    /// schema validator collaborator, since a meta-schema check over Draft
    /// 2020-12 is out of this crate's scope.
    #[must_use]
    pub fn has_well_formed_type_token(&self) -> bool {
        is_identity_token(&self.identity_type)
    }

    /// Build an `IdentityDef`, rejecting a malformed `identity_type` up
    /// front rather than deferring to C1's meta-schema check.
    ///
    /// This is a convenience for hosts assembling definitions in code; the
    /// runtime workflow still re-checks every definition via
    /// `validate_definitions`, since this constructor cannot see other
    /// definitions in the same input set (uniqueness is a cross-definition
    /// concern).
    pub fn checked(identity_type: impl Into<String>, schema: Value) -> Result<Self, MalformedIdentityType> {
        let identity_type = identity_type.into();
        if is_identity_token(&identity_type) {
            Ok(Self {
                identity_type,
                schema,
            })
        } else {
            Err(MalformedIdentityType(identity_type))
        }
    }
}

/// `identity_type` does not match `^[A-Za-z0-9_]{1,256}$`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("identity_type {0:?} is not a well-formed token")]
pub struct MalformedIdentityType(pub String);

/// Returns `true` iff `s` matches `^[A-Za-z0-9_]{1,256}$`.
#[must_use]
pub fn is_identity_token(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 256
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
