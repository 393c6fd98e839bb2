//! I define the resource type definition.
//!

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::identity::is_identity_token;

/// A resource type definition.
///
/// > `resource_type` (same token rules), ordered-unique `actions` list
/// > (tokens `[A-Za-z0-9_.:-]`, max 512), `schema` (JSON Schema),
/// > `parent_types` (set of resource-type names), `child_types` (set of
/// > resource-type names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Name of the resource type, e.g. `"Balloon"`.
    pub resource_type: String,

    /// Ordered, unique list of action names defined on this resource type.
    pub actions: Vec<String>,

    /// JSON Schema that a `resource` object of this type must validate
    /// against.
    pub schema: Value,

    /// Names of resource types that may appear as a parent of this one.
    pub parent_types: BTreeSet<String>,

    /// Names of resource types that may appear as a child of this one.
    pub child_types: BTreeSet<String>,
}

impl ResourceDef {
    /// Check [`Self::resource_type`] token shape.
    #[must_use]
    pub fn has_well_formed_type_token(&self) -> bool {
        is_identity_token(&self.resource_type)
    }

    /// Check that [`Self::actions`] is non-empty, every entry matches
    /// `^[A-Za-z0-9_.:\-]{1,512}$`, and entries are pairwise unique.
    #[must_use]
    pub fn has_well_formed_actions(&self) -> bool {
        if self.actions.is_empty() {
            return false;
        }
        let mut seen = BTreeSet::new();
        for action in &self.actions {
            if !is_action_token(action) || !seen.insert(action.as_str()) {
                return false;
            }
        }
        true
    }

    /// Build a `ResourceDef`, rejecting a malformed `resource_type` or
    /// `actions` list up front. See [`IdentityDef::checked`] for the same
    /// convenience on identities; cross-definition checks (type-name
    /// uniqueness, parent/child referential integrity) still belong to
    /// `validate_definitions`.
    pub fn checked(
        resource_type: impl Into<String>,
        actions: Vec<String>,
        schema: Value,
        parent_types: BTreeSet<String>,
        child_types: BTreeSet<String>,
    ) -> Result<Self, MalformedResourceDef> {
        let resource_type = resource_type.into();
        if !is_identity_token(&resource_type) {
            return Err(MalformedResourceDef::ResourceType(resource_type));
        }
        let def = Self {
            resource_type,
            actions,
            schema,
            parent_types,
            child_types,
        };
        if !def.has_well_formed_actions() {
            return Err(MalformedResourceDef::Actions(def.resource_type));
        }
        Ok(def)
    }
}

/// A `ResourceDef` built via [`ResourceDef::checked`] failed its token-shape
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResourceDef {
    /// `resource_type` does not match `^[A-Za-z0-9_]{1,256}$`.
    #[error("resource_type {0:?} is not a well-formed token")]
    ResourceType(String),
    /// `actions` is empty, has duplicates, or contains a malformed token.
    #[error("resource_type {0:?} has a malformed actions list")]
    Actions(String),
}

/// Returns `true` iff `s` matches `^[A-Za-z0-9_.:\-]{1,512}$`.
#[must_use]
pub fn is_action_token(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 512
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')
        })
}
